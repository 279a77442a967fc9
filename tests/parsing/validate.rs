#[cfg(test)]
mod validate {
    use blockcheck::document::BlockDocument;
    use blockcheck::language::*;
    use blockcheck::matching::{Path, Step};
    use blockcheck::normalize::normalize_document;
    use blockcheck::parsing::{parse_with_errors, validate_equivalence};

    fn blocks(json: &str) -> Vec<ProgramNode> {
        let document = BlockDocument::from_json(json).expect("valid block document");
        normalize_document(&document, None)
    }

    fn pseudocode(text: &str) -> Vec<ProgramNode> {
        parse_with_errors(text).expect("valid pseudocode")
    }

    fn assert_equivalent(json: &str, text: &str) {
        let result = validate_equivalence(&blocks(json), &pseudocode(text));
        assert!(result.valid, "expected equivalence, got {:?}", result.error);
        assert_eq!(result.error, None);
    }

    #[test]
    fn three_actions() {
        assert_equivalent(
            r#"
{
    "blocks": { "blocks": [
        { "type": "move_forward", "id": "a", "x": 10, "y": 10,
          "next": { "block": { "type": "turn_left", "id": "b",
            "next": { "block": { "type": "collect_item", "id": "c" } } } } }
    ] }
}
            "#,
            "move_forward()\nturn_left()\ncollect()\n",
        );
    }

    #[test]
    fn single_if() {
        assert_equivalent(
            r#"
{
    "blocks": { "blocks": [
        { "type": "controls_if", "id": "if1",
          "inputs": {
            "IF0": { "block": { "type": "is_path_ahead", "id": "p" } },
            "DO0": { "block": { "type": "move_forward", "id": "m" } }
          } }
    ] }
}
            "#,
            "if path_ahead() {\n    move_forward()\n}\n",
        );
    }

    #[test]
    fn implicit_else() {
        let json = r#"
{
    "blocks": { "blocks": [
        { "type": "controls_whileUntil", "id": "w", "fields": { "MODE": "WHILE" },
          "inputs": {
            "BOOL": { "block": { "type": "logic_boolean", "id": "t", "fields": { "BOOL": "TRUE" } } },
            "DO": { "block": { "type": "controls_ifelse", "id": "if1",
              "inputs": {
                "IF0": { "block": { "type": "at_goal", "id": "g" } },
                "DO0": { "block": { "type": "collect_item", "id": "c",
                  "next": { "block": { "type": "controls_flow_statements", "id": "b",
                    "fields": { "FLOW": "BREAK" } } } } },
                "ELSE": { "block": { "type": "move_forward", "id": "m",
                  "next": { "block": { "type": "turn_left", "id": "l" } } } }
              } } }
          } }
    ] }
}
        "#;

        let text = r#"
while true {
    if at_goal() {
        collect()
        break
    }
    move_forward()
    turn_left()
}
        "#;

        assert_equivalent(json, text);

        // written out in full, the same program
        let explicit = r#"
while true {
    if at_goal() {
        collect()
        break
    } else {
        move_forward()
        turn_left()
    }
}
        "#;
        assert_equivalent(json, explicit);

        // but the absorbed statements must match exactly
        let wrong = r#"
while true {
    if at_goal() {
        collect()
        break
    }
    move_forward()
    turn_right()
}
        "#;
        let result = validate_equivalence(&blocks(json), &pseudocode(wrong));
        assert!(!result.valid);
        let error = result
            .error
            .unwrap();
        assert_eq!(
            error.path,
            Path(vec![
                Step::Statement(0),
                Step::Body,
                Step::Statement(0),
                Step::Else,
                Step::Statement(1)
            ])
        );
    }

    #[test]
    fn repeat_three() {
        assert_equivalent(
            r#"
{
    "blocks": { "blocks": [
        { "type": "controls_repeat_ext", "id": "r",
          "inputs": {
            "TIMES": { "shadow": { "type": "math_number", "id": "n", "fields": { "NUM": 3 } } },
            "DO": { "block": { "type": "move_forward", "id": "m" } }
          } }
    ] }
}
            "#,
            "repeat(3) {\n    move_forward()\n}\n",
        );
    }

    #[test]
    fn repeat_with_variable_count_as_for() {
        assert_equivalent(
            r#"
{
    "blocks": { "blocks": [
        { "type": "controls_repeat_ext", "id": "r",
          "inputs": {
            "TIMES": { "block": { "type": "variables_get", "id": "n", "fields": { "VAR": { "id": "steps" } } } },
            "DO": { "block": { "type": "move_forward", "id": "m" } }
          } }
    ] }
}
            "#,
            "for i in range(steps) {\n    move_forward()\n}\n",
        );
    }

    #[test]
    fn counted_for_in_either_convention() {
        let json = r#"
{
    "blocks": { "blocks": [
        { "type": "controls_for", "id": "f", "fields": { "VAR": { "id": "i" } },
          "inputs": {
            "FROM": { "block": { "type": "math_number", "id": "a", "fields": { "NUM": 0 } } },
            "TO": { "block": { "type": "variables_get", "id": "b", "fields": { "VAR": { "id": "n" } } } },
            "DO": { "block": { "type": "turn_left", "id": "t" } }
          } }
    ] }
}
        "#;

        assert_equivalent(json, "for i from 0 to n {\n    turn_left()\n}\n");
        assert_equivalent(json, "for i in range(n) {\n    turn_left()\n}\n");
        assert_equivalent(json, "for (let i = 0; i < n; i++) {\n    turn_left()\n}\n");

        // the body still has to agree
        let result = validate_equivalence(&blocks(json), &pseudocode("for i in range(n) {\n    turn_right()\n}\n"));
        assert!(!result.valid);
        assert_eq!(
            result
                .error
                .unwrap()
                .path,
            Path(vec![Step::Statement(0), Step::Body, Step::Statement(0)])
        );
    }

    #[test]
    fn function_with_nested_conditional() {
        assert_equivalent(
            r#"
{
    "blocks": { "blocks": [
        { "type": "procedures_callnoreturn", "id": "call", "x": 10, "y": 300,
          "extraState": { "name": "explore" } },
        { "type": "procedures_defnoreturn", "id": "def", "x": 10, "y": 10,
          "fields": { "NAME": "explore" },
          "inputs": {
            "STACK": { "block": { "type": "controls_if", "id": "if1",
              "inputs": {
                "IF0": { "block": { "type": "is_path_ahead", "id": "p" } },
                "DO0": { "block": { "type": "move_forward", "id": "m" } }
              } } }
          } }
    ] }
}
            "#,
            r#"
def explore() {
    if path_ahead() {
        move_forward()
    }
}

explore()
            "#,
        );
    }

    #[test]
    fn compound_condition_kept_as_text() {
        assert_equivalent(
            r#"
{
    "blocks": { "blocks": [
        { "type": "controls_if", "id": "if1",
          "inputs": {
            "IF0": { "block": { "type": "logic_operation", "id": "and", "fields": { "OP": "AND" },
              "inputs": {
                "A": { "block": { "type": "is_path_ahead", "id": "p" } },
                "B": { "block": { "type": "logic_negate", "id": "n",
                  "inputs": { "BOOL": { "block": { "type": "at_goal", "id": "g" } } } } }
              } } },
            "DO0": { "block": { "type": "move_forward", "id": "m" } }
          } }
    ] }
}
            "#,
            "if the path is clear and we are not done {\n    move_forward()\n}\n",
        );
    }

    #[test]
    fn declarations_may_be_extra() {
        assert_equivalent(
            r#"
{
    "blocks": { "blocks": [
        { "type": "move_forward", "id": "a" }
    ] }
}
            "#,
            "let steps = 0\nmove_forward()\n",
        );
    }

    #[test]
    fn first_difference_reported() {
        let json = r#"
{
    "blocks": { "blocks": [
        { "type": "controls_repeat_ext", "id": "r",
          "inputs": {
            "TIMES": { "shadow": { "type": "math_number", "id": "n", "fields": { "NUM": 3 } } },
            "DO": { "block": { "type": "move_forward", "id": "m" } }
          } }
    ] }
}
        "#;

        let result = validate_equivalence(&blocks(json), &pseudocode("repeat(3) {\n    turn_left()\n}\n"));
        assert!(!result.valid);

        let error = result
            .error
            .unwrap();
        assert_eq!(error.path, Path(vec![Step::Statement(0), Step::Body, Step::Statement(0)]));
        assert_eq!(
            error
                .expected
                .map(|label| label.kind),
            Some(Kind::Action(Action::MoveForward))
        );
        assert_eq!(
            error
                .found
                .map(|label| label.kind),
            Some(Kind::Action(Action::TurnLeft))
        );
    }
}
