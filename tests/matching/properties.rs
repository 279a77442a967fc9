#[cfg(test)]
mod properties {
    use blockcheck::language::*;
    use blockcheck::matching::*;
    use blockcheck::parsing::parse_pseudocode;

    fn program(text: &str) -> Vec<ProgramNode> {
        let nodes = parse_pseudocode(text);
        assert!(!nodes.is_empty() || text.trim().is_empty(), "did not parse: {}", text);
        nodes
    }

    fn samples() -> Vec<Vec<ProgramNode>> {
        vec![
            vec![],
            program("move_forward()\nturn_left()\ncollect()"),
            program("repeat(4) {\n    if path_ahead() {\n        move_forward()\n    } else {\n        turn_right()\n    }\n}"),
            program("def walk(n) {\n    repeat(n) { move_forward() }\n}\nwalk(2)\ncollect()"),
            program("let queue = [start]\nwhile len(queue) > 0 {\n    current = queue.pop()\n}"),
        ]
    }

    #[test]
    fn exact_is_reflexive() {
        for sample in samples() {
            assert!(exactly_equals(&sample, &sample));
        }
    }

    #[test]
    fn full_sequence_matches_itself_completely() {
        for sample in samples()
            .into_iter()
            .filter(|sample| !sample.is_empty())
        {
            let result = fuzzy_match(&sample, &sample);
            assert_eq!(result.percentage, 100);
            assert!(result.is_complete());
        }
    }

    #[test]
    fn empty_target_scores_zero() {
        let student = program("move_forward()");
        let result = fuzzy_match(&student, &[]);
        assert_eq!(result.percentage, 0);
        assert!(!result.is_complete());
    }

    #[test]
    fn insertions_are_tolerated() {
        let target = program("move_forward()\nturn_left()\nmove_forward()");
        let student = program("move_forward()\nmove_forward()\nturn_left()\nmove_forward()");

        let result = fuzzy_match(&student, &target);
        assert_eq!(result.matched_count, 3);
        assert_eq!(result.total_count, 3);
        assert_eq!(result.percentage, 100);

        // but it is not the solution
        assert!(!exactly_equals(&student, &target));
    }

    #[test]
    fn prefix_sensitivity() {
        let target = program("move_forward()\nturn_left()\ncollect()");

        let result = fuzzy_match(&program("turn_left()\ncollect()"), &target);
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.percentage, 0);

        let result = fuzzy_match(&program("move_forward()\nturn_right()\nturn_left()\ncollect()"), &target);
        assert_eq!(result.matched_count, 3);

        let result = fuzzy_match(&program("move_forward()\ncollect()"), &target);
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.percentage, 33);
    }

    #[test]
    fn progress_never_goes_backwards() {
        let pattern = Pattern::new("route", program("move_forward()\nturn_left()\ncollect()"))
            .with_checkpoint(Checkpoint::new(program("turn_right()"), "turn right"))
            .with_checkpoint(Checkpoint::new(program("turn_right()\nmove_forward()"), "then move"));

        for student in [
            "",
            "move_forward()",
            "turn_right()",
            "turn_right()\nmove_forward()",
            "move_forward()\nturn_left()\ncollect()",
        ] {
            let result = progressive_match(&program(student), &pattern);
            if result.checkpoint3 {
                assert!(result.checkpoint1 && result.checkpoint2, "{}", student);
            }
            if result.checkpoint2 {
                assert!(result.checkpoint1, "{}", student);
            }
            assert!(result.matched_checkpoint_count <= 3);
        }
    }

    #[test]
    fn hint_index_bounded_and_complete_exactly_when_all_present() {
        let pattern = Pattern::new("route", program("repeat(2) {\n    move_forward()\n}\ncollect()"))
            .with_checkpoint(Checkpoint::new(program("repeat(2) {\n}"), "add a loop"))
            .with_checkpoint(Checkpoint::new(
                program("repeat(2) {\n    move_forward()\n}"),
                "move in the loop",
            ))
            .with_checkpoint(Checkpoint::new(
                program("repeat(2) {\n    move_forward()\n}\ncollect()"),
                "collect at the end",
            ));

        for (student, step) in [
            ("", 0),
            ("turn_left()", 0),
            ("repeat(2) {\n}", 1),
            ("repeat(2) {\n}\nmove_forward()", 1),
            ("repeat(2) {\n    move_forward()\n}", 2),
            ("turn_left()\nrepeat(5) {\n    turn_left()\n    move_forward()\n}\ncollect()", 3),
        ] {
            let hint = next_hint(&program(student), &pattern);
            assert_eq!(hint.step_index, step, "{}", student);
            assert!(hint.step_index <= pattern.checkpoints.len());
            assert_eq!(hint.is_complete, step == 3, "{}", student);
        }
    }

    #[test]
    fn scenario() {
        let target = program("move_forward()\nturn_left()\nmove_forward()");
        let student = program("move_forward()\nmove_forward()\nturn_left()\nmove_forward()");

        let patterns = vec![Pattern::new("target", target)];
        let result = best_pattern_match(&student, &patterns);
        assert_eq!(result.matched_count, 3);
        assert_eq!(result.percentage, 100);
        assert_eq!(
            result
                .best_pattern
                .map(|pattern| pattern.name.as_str()),
            Some("target")
        );
    }
}
