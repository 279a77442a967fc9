#[cfg(test)]
mod puzzles {
    use std::path::Path;

    use blockcheck::language::*;
    use blockcheck::matching::*;
    use blockcheck::parsing::{self, parse_pseudocode};
    use blockcheck::puzzle::Puzzle;

    fn corridor() -> (Puzzle, Vec<Pattern>) {
        let content = parsing::load(Path::new("tests/puzzles/corridor.json")).expect("puzzle file present");
        let puzzle = Puzzle::from_json(&content).expect("valid puzzle");
        let patterns = puzzle
            .patterns()
            .expect("authored programs parse");
        (puzzle, patterns)
    }

    const SOLUTION: &str = r#"
repeat(3) {
    move_forward()
}
turn_left()
collect()
"#;

    const LONG_WAY: &str = r#"
move_forward()
move_forward()
move_forward()
turn_left()
collect()
"#;

    #[test]
    fn patterns_in_written_order() {
        let (puzzle, patterns) = corridor();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].name, "loop");
        assert_eq!(patterns[0].reward_key, "gold_star");
        assert_eq!(patterns[0].checkpoints.len(), 2);
        assert_eq!(patterns[1].name, "long way");
        assert_eq!(patterns[1].full_sequence.len(), 5);
        assert_eq!(puzzle.complete_message(), "All steps done, run it!");
    }

    #[test]
    fn block_solution_equals_pseudocode() {
        let (_, patterns) = corridor();
        assert!(exactly_equals(&parse_pseudocode(LONG_WAY), &patterns[1].full_sequence));
    }

    #[test]
    fn solving_each_pattern() {
        let (_, patterns) = corridor();

        let solution = solved(&parse_pseudocode(SOLUTION), &patterns).map(|pattern| pattern.reward_key.as_str());
        assert_eq!(solution, Some("gold_star"));

        let solution = solved(&parse_pseudocode(LONG_WAY), &patterns).map(|pattern| pattern.reward_key.as_str());
        assert_eq!(solution, Some("bronze_star"));

        assert_eq!(solved(&parse_pseudocode("move_forward()\nturn_left()"), &patterns), None);
    }

    #[test]
    fn closest_pattern() {
        let (_, patterns) = corridor();

        let result = best_pattern_match(&parse_pseudocode("move_forward()\nmove_forward()"), &patterns);
        assert_eq!(
            result
                .best_pattern
                .map(|pattern| pattern.name.as_str()),
            Some("long way")
        );
        assert_eq!(result.matched_count, 2);
        assert_eq!(result.total_count, 5);
        assert_eq!(result.percentage, 40);

        // nothing written yet, so the preferred pattern
        let result = best_pattern_match(&[], &patterns);
        assert_eq!(result.percentage, 0);
        assert_eq!(
            result
                .best_pattern
                .map(|pattern| pattern.name.as_str()),
            Some("loop")
        );
    }

    #[test]
    fn furthest_along() {
        let (_, patterns) = corridor();

        let selected = best_progressive_match(&parse_pseudocode("repeat(3) {\n}\n"), &patterns).unwrap();
        assert_eq!(selected.pattern.name, "loop");
        assert_eq!(selected.result.matched_checkpoint_count, 1);
        assert!(selected.result.checkpoint1);
        assert!(!selected.result.checkpoint2);

        let selected = best_progressive_match(&parse_pseudocode(LONG_WAY), &patterns).unwrap();
        assert_eq!(selected.pattern.name, "long way");
        assert_eq!(selected.result.matched_checkpoint_count, 3);
    }

    #[test]
    fn hints_towards_loop() {
        let (puzzle, patterns) = corridor();
        let pattern = &patterns[0];

        let hint = next_hint_with(&[], pattern, puzzle.complete_message());
        assert_eq!(hint.step_index, 0);
        assert_eq!(hint.message, "Use a repeat block to walk down the corridor");
        assert_eq!(hint.highlight, vec!["repeat"]);
        assert!(!hint.is_complete);

        let hint = next_hint_with(&parse_pseudocode("repeat(3) {\n}\n"), pattern, puzzle.complete_message());
        assert_eq!(hint.step_index, 1);
        assert_eq!(hint.message, "Turn left at the end");

        let hint = next_hint_with(&parse_pseudocode(SOLUTION), pattern, puzzle.complete_message());
        assert!(hint.is_complete);
        assert_eq!(hint.step_index, 2);
        assert_eq!(hint.message, "All steps done, run it!");
        assert!(hint
            .highlight
            .is_empty());
    }

    #[test]
    fn default_complete_message() {
        let (_, patterns) = corridor();
        let hint = next_hint(&parse_pseudocode(LONG_WAY), &patterns[1]);
        assert!(hint.is_complete);
        assert_eq!(hint.message, "Pattern complete!");
    }
}
