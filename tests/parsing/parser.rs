#[cfg(test)]
mod verify {
    use blockcheck::language::*;
    use blockcheck::parsing::{parse_pseudocode, parse_with_errors, ParsingError};

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    fn kinds(nodes: &[ProgramNode]) -> Vec<Kind> {
        nodes
            .iter()
            .map(ProgramNode::kind)
            .collect()
    }

    #[test]
    fn breadth_first_search() {
        let nodes = parse_with_errors(trim(
            r#"
let queue = [start]
let visited = []
while len(queue) > 0 {
    current = queue.pop()   // next to explore
    if current == goal {
        return current
    }
    visited.append(current)
    for next in neighbors(current) {
        if not visited.contains(next) {
            queue.append(next)
        }
    }
}
            "#,
        ))
        .unwrap();

        assert_eq!(kinds(&nodes), vec![Kind::Assignment, Kind::Assignment, Kind::While]);

        let condition = &nodes[2].inputs[0];
        assert_eq!(condition.kind(), Kind::Compare);
        assert_eq!(condition.inputs[0].kind(), Kind::Call(Builtin::Length));

        let body = nodes[2]
            .body()
            .unwrap();
        assert_eq!(
            kinds(body),
            vec![
                Kind::Call(Builtin::Pop),
                Kind::Conditional,
                Kind::Call(Builtin::Append),
                Kind::ForEach
            ]
        );
        assert_eq!(body[0].id, "line:4");
        assert_eq!(
            body[1]
                .body()
                .unwrap()[0]
                .kind(),
            Kind::Terminal(Terminal::Return)
        );

        let inner = body[3]
            .body()
            .unwrap();
        assert_eq!(inner[0].inputs[0].kind(), Kind::Negate);
        assert_eq!(inner[0].inputs[0].inputs[0].kind(), Kind::Call(Builtin::Contains));
    }

    #[test]
    fn function_with_parameters() {
        let nodes = parse_with_errors(trim(
            r#"
function walk(steps) {
    repeat(steps) {
        move_forward()
    }
    return
}

walk(3)
            "#,
        ))
        .unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].procedure_name(), Some("walk"));

        // an explicit return is not doubled up
        let body = nodes[0]
            .body()
            .unwrap();
        assert_eq!(kinds(body), vec![Kind::Repeat, Kind::Terminal(Terminal::Return)]);
        assert_eq!(body[0].inputs[0].variable_name(), Some("steps"));

        assert_eq!(nodes[1].procedure_name(), Some("walk"));
        assert_eq!(nodes[1].id, "line:8");
    }

    #[test]
    fn single_line_blocks() {
        let nodes = parse_with_errors("if path_ahead() { move_forward() } else { turn_right() }").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(
            nodes[0]
                .alternate()
                .map(kinds),
            Some(vec![Kind::Action(Action::TurnRight)])
        );
    }

    #[test]
    fn until_is_negated_while() {
        let nodes = parse_with_errors("until at_goal() {\n    move_forward()\n}").unwrap();
        assert_eq!(nodes[0].kind(), Kind::While);
        assert_eq!(nodes[0].inputs[0].kind(), Kind::Negate);
        assert_eq!(nodes[0].inputs[0].inputs[0].kind(), Kind::Call(Builtin::AtGoal));
    }

    #[test]
    fn counted_loops_with_literal_bounds() {
        for text in [
            "repeat(3) { turn_left() }",
            "repeat 3 times { turn_left() }",
            "for i in range(3) { turn_left() }",
            "for i in range(0, 3) { turn_left() }",
            "for (let i = 0; i < 3; i++) { turn_left() }",
            "for (i = 1; i <= 3; i++) { turn_left() }",
            "for i from 1 to 3 { turn_left() }",
        ] {
            let nodes = parse_with_errors(text).unwrap();
            assert_eq!(nodes[0].kind(), Kind::Repeat, "{}", text);
            assert_eq!(
                nodes[0].inputs[0].form,
                Form::Literal {
                    value: Literal::Number(3)
                },
                "{}",
                text
            );
        }
    }

    #[test]
    fn errors_carry_offsets() {
        assert_eq!(
            parse_with_errors("move_forward()\nelse {\n}"),
            Err(ParsingError::DanglingElse(15))
        );
        assert_eq!(
            parse_with_errors("for i forever {\n}"),
            Err(ParsingError::InvalidLoop(3))
        );
        assert_eq!(
            parse_with_errors("let 2x = 1"),
            Err(ParsingError::Unrecognized(0))
        );

        let error = parse_with_errors("while true {\n  move_forward()\n").unwrap_err();
        assert_eq!(error, ParsingError::UnclosedBlock(11));
        assert_eq!(error.message(), "block opened here is never closed");
    }

    #[test]
    fn expression_errors_point_at_token() {
        assert_eq!(parse_with_errors("x = 1  2"), Err(ParsingError::InvalidExpression(7)));
        assert_eq!(
            parse_with_errors("let x = 1  2"),
            Err(ParsingError::InvalidExpression(11))
        );
        assert_eq!(
            parse_with_errors("move_forward()\nreturn 1  2"),
            Err(ParsingError::InvalidExpression(25))
        );
        assert_eq!(
            parse_with_errors("seen[1  2] = true"),
            Err(ParsingError::InvalidExpression(8))
        );
        assert_eq!(
            parse_with_errors("for i from 1 to 2  3 {\n}"),
            Err(ParsingError::InvalidExpression(19))
        );

        let source = "for aéé in range(1  2) {\n}";
        let error = parse_with_errors(source).unwrap_err();
        assert_eq!(error, ParsingError::InvalidExpression(22));
        assert!(source.is_char_boundary(error.offset()));
    }

    #[test]
    fn oversized_loop_bounds_stay_loops() {
        for text in [
            "for i in range(-9223372036854775807, 9223372036854775807) { turn_left() }",
            "for i in range(-9223372036854775807, 9223372036854775807, 2) { turn_left() }",
            "for (i = -9223372036854775807; i <= 9223372036854775807; i++) { turn_left() }",
            "for i from -9223372036854775807 to 9223372036854775807 { turn_left() }",
        ] {
            let nodes = parse_with_errors(text).unwrap();
            assert_eq!(nodes[0].kind(), Kind::For, "{}", text);
        }
    }

    #[test]
    fn incomplete_program_is_empty() {
        assert!(parse_pseudocode("repeat(3) {\n    move_forward(").is_empty());
        assert!(parse_pseudocode("").is_empty());
        assert!(parse_pseudocode("# nothing yet\n").is_empty());
    }
}
