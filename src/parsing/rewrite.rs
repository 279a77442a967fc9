//! Rewriting of parsed programs into a canonical shape before they are
//! compared with anything.

use crate::language::*;

/// Turn an `if` whose body ends in a terminal into an `if`/`else`: every
/// statement following it in the same scope can only run when the condition
/// was false, so it belongs in the else branch. Statements absorbed this way
/// are appended to any else branch already written. Empty else branches are
/// dropped. Applied recursively through every body.
pub fn promote_implicit_else(nodes: Vec<ProgramNode>) -> Vec<ProgramNode> {
    let mut result = Vec::with_capacity(nodes.len());
    let mut remaining = nodes.into_iter();

    while let Some(mut node) = remaining.next() {
        match &mut node.form {
            Form::Conditional {
                body,
                alternate,
                implicit_else,
            } => {
                *body = promote_implicit_else(std::mem::take(body));

                let mut branch = alternate.take();
                if ends_in_terminal(body) {
                    let following: Vec<ProgramNode> = remaining
                        .by_ref()
                        .collect();
                    if !following.is_empty() {
                        branch
                            .get_or_insert_with(Vec::new)
                            .extend(following);
                        *implicit_else = true;
                    }
                }

                *alternate = branch
                    .map(promote_implicit_else)
                    .filter(|nodes| !nodes.is_empty());
            }
            Form::Repeat { body }
            | Form::While { body }
            | Form::For { body }
            | Form::ForEach { body }
            | Form::ProcedureDefinition { body, .. } => {
                *body = promote_implicit_else(std::mem::take(body));
            }
            _ => {}
        }

        result.push(node);
    }

    link(&mut result);
    result
}

fn ends_in_terminal(body: &[ProgramNode]) -> bool {
    body.last()
        .map(|node| {
            node.kind()
                .is_terminal()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod check {
    use super::*;

    fn action(id: &str, action: Action) -> ProgramNode {
        ProgramNode::new(id, Form::Action { action })
    }

    fn terminal(id: &str) -> ProgramNode {
        ProgramNode::new(
            id,
            Form::Terminal {
                terminal: Terminal::Return,
            },
        )
    }

    fn conditional(id: &str, body: Vec<ProgramNode>, alternate: Option<Vec<ProgramNode>>) -> ProgramNode {
        ProgramNode::new(
            id,
            Form::Conditional {
                body,
                alternate,
                implicit_else: false,
            },
        )
    }

    #[test]
    fn following_statements_become_else() {
        let nodes = vec![
            conditional("if", vec![terminal("r")], None),
            action("a", Action::MoveForward),
            action("b", Action::TurnLeft),
        ];

        let nodes = promote_implicit_else(nodes);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].has_implicit_else());
        assert!(!nodes[0].has_next);

        let alternate = nodes[0]
            .alternate()
            .unwrap();
        assert_eq!(alternate.len(), 2);
        assert!(alternate[0].has_next);
    }

    #[test]
    fn nothing_following_leaves_conditional_alone() {
        let nodes = vec![conditional("if", vec![terminal("r")], None)];
        let nodes = promote_implicit_else(nodes);
        assert!(!nodes[0].has_implicit_else());
        assert_eq!(nodes[0].alternate(), None);
    }

    #[test]
    fn body_without_terminal_unchanged() {
        let nodes = vec![
            conditional("if", vec![action("a", Action::Collect)], Some(vec![])),
            action("b", Action::TurnLeft),
        ];
        let nodes = promote_implicit_else(nodes);
        assert_eq!(nodes.len(), 2);
        // the empty else is gone
        assert_eq!(nodes[0].alternate(), None);
    }

    #[test]
    fn absorbed_statements_follow_written_else() {
        let nodes = vec![
            conditional(
                "if",
                vec![terminal("r")],
                Some(vec![action("a", Action::TurnLeft)]),
            ),
            action("b", Action::Collect),
        ];
        let nodes = promote_implicit_else(nodes);
        let alternate = nodes[0]
            .alternate()
            .unwrap();
        assert_eq!(alternate[0].id, "a");
        assert_eq!(alternate[1].id, "b");
    }

    #[test]
    fn nested_scopes_rewritten() {
        let nodes = vec![ProgramNode::new(
            "def",
            Form::ProcedureDefinition {
                name: "walk".to_string(),
                body: vec![
                    conditional("if", vec![terminal("r")], None),
                    action("a", Action::MoveForward),
                    terminal("end"),
                ],
            },
        )];

        let nodes = promote_implicit_else(nodes);
        let body = nodes[0]
            .body()
            .unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(
            body[0]
                .alternate()
                .unwrap()
                .len(),
            2
        );
    }
}
