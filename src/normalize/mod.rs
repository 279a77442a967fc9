//! Reduce a serialized block tree to the normalized program model.

use tracing::{debug, warn};

use crate::document::{Block, BlockDocument, LiveDocument, VariableTable};
use crate::language::*;

/// Block types that exist only for bookkeeping or for driving the
/// visualization; they carry no structure worth comparing.
const BOOKKEEPING: &[&str] = &[
    "math_change",
    "highlight_node",
    "visualize_graph",
    "show_path",
    "wait_seconds",
];

/// Normalize every top-level chain of a document, resolving variables
/// through the document's declarations or, failing that, the live document.
pub fn normalize_document(document: &BlockDocument, live: Option<&dyn LiveDocument>) -> Vec<ProgramNode> {
    let table = VariableTable::resolve_for(document, live);
    normalize(document.roots(), &table)
}

/// Normalize a set of top-level chains. Chains are taken top to bottom by
/// their position in the editor and concatenated.
pub fn normalize(roots: &[Block], table: &VariableTable) -> Vec<ProgramNode> {
    let mut ordered: Vec<&Block> = roots
        .iter()
        .collect();

    // stable, so blocks at the same position keep document order
    ordered.sort_by(|a, b| {
        let (ay, ax) = a.position();
        let (by, bx) = b.position();
        ay.total_cmp(&by)
            .then(ax.total_cmp(&bx))
    });

    let normalizer = Normalizer { table };

    let mut result = Vec::new();
    for root in ordered {
        let chain = normalizer.chain(root);

        if let Some(first) = chain.first() {
            if first
                .kind()
                .is_expression()
            {
                debug!("Ignoring loose value block {}", root.id);
                continue;
            }
        }

        result.extend(chain);
    }

    debug!("Normalized {} top-level statements", result.len());
    result
}

struct Normalizer<'t> {
    table: &'t VariableTable,
}

impl<'t> Normalizer<'t> {
    /// Follow next links from a block, normalizing each statement.
    fn chain(&self, first: &Block) -> Vec<ProgramNode> {
        let mut nodes = Vec::new();
        let mut current = Some(first);

        while let Some(block) = current {
            if let Some(node) = self.convert(block) {
                nodes.push(node);
            }
            current = block.next_block();
        }

        link(&mut nodes);
        nodes
    }

    /// The statements plugged into a statement input. A missing input is an
    /// empty body, not an absent one: the slot exists on the block.
    fn body(&self, block: &Block, name: &str) -> Vec<ProgramNode> {
        match block.input(name) {
            Some(first) => self.chain(first),
            None => Vec::new(),
        }
    }

    fn value(&self, block: &Block, name: &str) -> Option<ProgramNode> {
        block
            .input(name)
            .and_then(|value| self.convert(value))
    }

    /// Value inputs in their fixed order. Unplugged slots are skipped.
    fn values(&self, block: &Block, names: &[&str]) -> Vec<ProgramNode> {
        names
            .iter()
            .filter_map(|name| self.value(block, name))
            .collect()
    }

    fn variable(&self, block: &Block) -> String {
        let raw = block
            .field("VAR")
            .unwrap_or("");
        self.table
            .resolve(raw)
            .to_string()
    }

    fn convert(&self, block: &Block) -> Option<ProgramNode> {
        let id = block
            .id
            .as_str();
        let block_type = block
            .block_type
            .as_str();

        if BOOKKEEPING.contains(&block_type) {
            debug!("Dropping bookkeeping block {} ({})", id, block_type);
            return None;
        }

        if let Some(action) = Action::from_block_type(block_type) {
            let inputs = self.values(block, &["NODE"]);
            return Some(ProgramNode::new(id, Form::Action { action }).with_inputs(inputs));
        }

        if let Some(builtin) = Builtin::from_block_type(block_type) {
            let inputs = self.values(block, builtin_inputs(block_type));
            return Some(ProgramNode::new(id, Form::Call { builtin }).with_inputs(inputs));
        }

        let node = match block_type {
            "variables_set" => {
                let variable = self.variable(block);
                let value = self.value(block, "VALUE");
                if let Some(value) = &value {
                    if is_increment(&variable, value) {
                        debug!("Dropping counter increment {}", id);
                        return None;
                    }
                }
                assignment(id, &variable, value)
            }
            "variables_get" => ProgramNode::new(
                id,
                Form::Variable {
                    variable: self.variable(block),
                },
            ),
            "controls_if" | "controls_ifelse" => self.conditional(block),
            "controls_repeat_ext" => ProgramNode::new(
                id,
                Form::Repeat {
                    body: self.body(block, "DO"),
                },
            )
            .with_inputs(self.values(block, &["TIMES"])),
            "controls_repeat" => {
                let inputs = match block.field_number("TIMES") {
                    Some(count) => vec![number(&format!("{}:count", id), count)],
                    None => vec![],
                };
                ProgramNode::new(
                    id,
                    Form::Repeat {
                        body: self.body(block, "DO"),
                    },
                )
                .with_inputs(inputs)
            }
            "controls_whileUntil" => {
                let condition = self.value(block, "BOOL");
                let condition = match (block.field("MODE"), condition) {
                    (Some("UNTIL"), Some(condition)) => Some(
                        ProgramNode::new(format!("{}:until", id), Form::Negate)
                            .with_inputs(vec![condition]),
                    ),
                    (_, condition) => condition,
                };
                ProgramNode::new(
                    id,
                    Form::While {
                        body: self.body(block, "DO"),
                    },
                )
                .with_inputs(
                    condition
                        .into_iter()
                        .collect(),
                )
            }
            "controls_for" => self.counted_loop(block),
            "controls_forEach" => ProgramNode::new(
                id,
                Form::ForEach {
                    body: self.body(block, "DO"),
                },
            )
            .with_inputs(self.values(block, &["LIST"])),
            "controls_flow_statements" => {
                let terminal = match block.field("FLOW") {
                    Some("CONTINUE") => Terminal::Continue,
                    _ => Terminal::Break,
                };
                ProgramNode::new(id, Form::Terminal { terminal })
            }
            "procedures_defnoreturn" | "procedures_defreturn" => self.definition(block),
            "procedures_callnoreturn" | "procedures_callreturn" => {
                let name = procedure_name(block);
                let count = block.count_numbered_inputs("ARG");
                let names: Vec<String> = (0..count)
                    .map(|i| format!("ARG{}", i))
                    .collect();
                let inputs = names
                    .iter()
                    .filter_map(|name| self.value(block, name))
                    .collect();
                ProgramNode::new(id, Form::ProcedureCall { name }).with_inputs(inputs)
            }
            "procedures_ifreturn" => {
                let terminal = ProgramNode::new(
                    format!("{}:return", id),
                    Form::Terminal {
                        terminal: Terminal::Return,
                    },
                )
                .with_inputs(self.values(block, &["VALUE"]));
                ProgramNode::new(
                    id,
                    Form::Conditional {
                        body: vec![terminal],
                        alternate: None,
                        implicit_else: false,
                    },
                )
                .with_inputs(self.values(block, &["CONDITION"]))
            }
            "procedures_return" => ProgramNode::new(
                id,
                Form::Terminal {
                    terminal: Terminal::Return,
                },
            )
            .with_inputs(self.values(block, &["VALUE"])),
            "logic_compare" => {
                ProgramNode::new(id, Form::Compare { source: None }).with_inputs(self.values(block, &["A", "B"]))
            }
            "logic_operation" => ProgramNode::new(id, Form::Combine).with_inputs(self.values(block, &["A", "B"])),
            "logic_negate" => ProgramNode::new(id, Form::Negate).with_inputs(self.values(block, &["BOOL"])),
            "math_arithmetic" => {
                ProgramNode::new(id, Form::Arithmetic).with_inputs(self.values(block, &["A", "B"]))
            }
            "math_number" => number(id, block.field_number("NUM")?),
            "logic_boolean" => ProgramNode::new(
                id,
                Form::Literal {
                    value: Literal::Boolean(block.field("BOOL") == Some("TRUE")),
                },
            ),
            "text" => ProgramNode::new(
                id,
                Form::Literal {
                    value: Literal::Text(
                        block
                            .field("TEXT")
                            .unwrap_or("")
                            .to_string(),
                    ),
                },
            ),
            "lists_create_empty" => ProgramNode::new(
                id,
                Form::Literal {
                    value: Literal::List,
                },
            ),
            "lists_create_with" => {
                let count = block.count_numbered_inputs("ADD");
                let names: Vec<String> = (0..count)
                    .map(|i| format!("ADD{}", i))
                    .collect();
                let inputs = names
                    .iter()
                    .filter_map(|name| self.value(block, name))
                    .collect();
                ProgramNode::new(
                    id,
                    Form::Literal {
                        value: Literal::List,
                    },
                )
                .with_inputs(inputs)
            }
            _ => {
                warn!("Unrecognized block type '{}' ({}) dropped", block_type, id);
                return None;
            }
        };

        Some(node)
    }

    /// A conditional with any number of else-if arms. Each further arm
    /// becomes a conditional nested in the else branch of the one before it,
    /// which is how `else if` reads in pseudocode.
    fn conditional(&self, block: &Block) -> ProgramNode {
        let arms = block
            .count_numbered_inputs("IF")
            .max(block.count_numbered_inputs("DO"))
            .max(1);

        let has_else = block
            .inputs
            .contains_key("ELSE")
            || block
                .extra("hasElse")
                .and_then(|value| value.as_bool())
                .unwrap_or(false)
            || block.block_type == "controls_ifelse";

        let mut alternate = if has_else {
            Some(self.body(block, "ELSE"))
        } else {
            None
        };

        for arm in (1..arms).rev() {
            let nested = ProgramNode::new(
                format!("{}:elseif{}", block.id, arm),
                Form::Conditional {
                    body: self.body(block, &format!("DO{}", arm)),
                    alternate: alternate.take(),
                    implicit_else: false,
                },
            )
            .with_inputs(
                self.value(block, &format!("IF{}", arm))
                    .into_iter()
                    .collect(),
            );
            alternate = Some(vec![nested]);
        }

        ProgramNode::new(
            block
                .id
                .as_str(),
            Form::Conditional {
                body: self.body(block, "DO0"),
                alternate,
                implicit_else: false,
            },
        )
        .with_inputs(self.values(block, &["IF0"]))
    }

    /// A `for` loop whose bounds are all literal integers is just a repeat
    /// with a known count.
    fn counted_loop(&self, block: &Block) -> ProgramNode {
        let id = block
            .id
            .as_str();
        let bounds = self.values(block, &["FROM", "TO", "BY"]);

        let literal = |name: &str| -> Option<i64> {
            match self.value(block, name) {
                Some(ProgramNode {
                    form:
                        Form::Literal {
                            value: Literal::Number(n),
                        },
                    ..
                }) => Some(n),
                _ => None,
            }
        };

        let step = if block
            .input("BY")
            .is_some()
        {
            literal("BY")
        } else {
            Some(1)
        };

        let count = match (literal("FROM"), literal("TO"), step) {
            (Some(from), Some(to), Some(by)) => iterations(from, to, by),
            _ => None,
        };

        match count {
            Some(count) => ProgramNode::new(
                id,
                Form::Repeat {
                    body: self.body(block, "DO"),
                },
            )
            .with_inputs(vec![number(&format!("{}:count", id), count)]),
            None => ProgramNode::new(
                id,
                Form::For {
                    body: self.body(block, "DO"),
                },
            )
            .with_inputs(bounds),
        }
    }

    fn definition(&self, block: &Block) -> ProgramNode {
        let id = block
            .id
            .as_str();
        let mut body = self.body(block, "STACK");

        // a value-returning definition carries its return as a separate slot
        if let Some(value) = self.value(block, "RETURN") {
            body.push(
                ProgramNode::new(
                    format!("{}:return", id),
                    Form::Terminal {
                        terminal: Terminal::Return,
                    },
                )
                .with_inputs(vec![value]),
            );
        }

        ProgramNode::new(
            id,
            Form::ProcedureDefinition {
                name: block
                    .field("NAME")
                    .unwrap_or("")
                    .to_string(),
                body: terminate(id, body),
            },
        )
    }
}

fn procedure_name(block: &Block) -> String {
    block
        .extra("name")
        .and_then(|value| value.as_str())
        .or_else(|| block.field("NAME"))
        .unwrap_or("")
        .to_string()
}

fn number(id: &str, n: i64) -> ProgramNode {
    ProgramNode::new(
        id,
        Form::Literal {
            value: Literal::Number(n),
        },
    )
}

/// Order of the value inputs on each builtin block, matching the order in
/// which the same operation takes its operands in pseudocode.
fn builtin_inputs(block_type: &str) -> &'static [&'static str] {
    match block_type {
        "graph_get_neighbors" => &["NODE"],
        "lists_length" => &["VALUE"],
        "lists_getIndex" => &["VALUE", "AT"],
        "dict_get" => &["DICT", "KEY"],
        "lists_contains" => &["LIST", "ITEM"],
        "list_push" | "lists_append" => &["LIST", "ITEM"],
        "list_pop" => &["LIST"],
        "dict_set" => &["DICT", "KEY", "VALUE"],
        "lists_setIndex" => &["LIST", "AT", "TO"],
        _ => &[],
    }
}
