//! Types representing a normalized program: the semantic model that both
//! serialized block documents and pseudocode are reduced to before any
//! comparison takes place.

use serde::Serialize;
use std::fmt;

/// One semantic unit of program structure. The shape of the node, including
/// whether it can carry a body at all, is determined by its [`Form`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgramNode {
    pub id: String,
    #[serde(flatten)]
    pub form: Form,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<ProgramNode>,
    pub has_next: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Form {
    // statements
    Action {
        action: Action,
    },
    Assignment {
        variable: String,
    },
    Call {
        builtin: Builtin,
    },
    Conditional {
        body: Vec<ProgramNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        alternate: Option<Vec<ProgramNode>>,
        // set when the alternate branch was inferred from the statements
        // following a conditional whose body ends in a terminal.
        #[serde(skip_serializing_if = "is_false")]
        implicit_else: bool,
    },
    Repeat {
        body: Vec<ProgramNode>,
    },
    While {
        body: Vec<ProgramNode>,
    },
    For {
        body: Vec<ProgramNode>,
    },
    ForEach {
        body: Vec<ProgramNode>,
    },
    ProcedureDefinition {
        name: String,
        body: Vec<ProgramNode>,
    },
    ProcedureCall {
        name: String,
    },
    Terminal {
        terminal: Terminal,
    },

    // expressions
    Compare {
        // only present on conditions the pseudocode parser could not
        // decompose; such a node stands in for the whole condition.
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
    Combine,
    Negate,
    Literal {
        value: Literal,
    },
    Variable {
        variable: String,
    },
    Arithmetic,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The closed set of node kinds. This is what matchers key on; two nodes of
/// different kinds never match exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Action(Action),
    Assignment,
    Call(Builtin),
    Conditional,
    Repeat,
    While,
    For,
    ForEach,
    ProcedureDefinition,
    ProcedureCall,
    Terminal(Terminal),
    Compare,
    Combine,
    Negate,
    Literal,
    Variable,
    Arithmetic,
}

impl Kind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Kind::Terminal(_))
    }

    /// Kinds that only ever appear in value position.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Kind::Compare
                | Kind::Combine
                | Kind::Negate
                | Kind::Literal
                | Kind::Variable
                | Kind::Arithmetic
        )
    }

    /// Calls whose identity matters more than any variable the result is
    /// stored into.
    pub fn is_call_like(&self) -> bool {
        matches!(self, Kind::Call(_) | Kind::ProcedureCall)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Action(action) => write!(f, "{}", action.name()),
            Kind::Assignment => write!(f, "assignment"),
            Kind::Call(builtin) => write!(f, "{}", builtin.name()),
            Kind::Conditional => write!(f, "if"),
            Kind::Repeat => write!(f, "repeat"),
            Kind::While => write!(f, "while"),
            Kind::For => write!(f, "for"),
            Kind::ForEach => write!(f, "for each"),
            Kind::ProcedureDefinition => write!(f, "function definition"),
            Kind::ProcedureCall => write!(f, "function call"),
            Kind::Terminal(terminal) => write!(f, "{}", terminal.name()),
            Kind::Compare => write!(f, "comparison"),
            Kind::Combine => write!(f, "and/or"),
            Kind::Negate => write!(f, "not"),
            Kind::Literal => write!(f, "value"),
            Kind::Variable => write!(f, "variable"),
            Kind::Arithmetic => write!(f, "arithmetic"),
        }
    }
}

/// Built-in statements that drive the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveForward,
    TurnLeft,
    TurnRight,
    Collect,
    MoveTo,
}

impl Action {
    pub fn from_block_type(block_type: &str) -> Option<Action> {
        match block_type {
            "move_forward" => Some(Action::MoveForward),
            "turn_left" => Some(Action::TurnLeft),
            "turn_right" => Some(Action::TurnRight),
            "collect_item" => Some(Action::Collect),
            "move_to_node" => Some(Action::MoveTo),
            _ => None,
        }
    }

    /// Accepts the spellings learners use in pseudocode.
    pub fn from_name(name: &str) -> Option<Action> {
        match name {
            "move_forward" | "moveForward" | "move" | "forward" => Some(Action::MoveForward),
            "turn_left" | "turnLeft" => Some(Action::TurnLeft),
            "turn_right" | "turnRight" => Some(Action::TurnRight),
            "collect" | "collect_item" | "collectItem" => Some(Action::Collect),
            "move_to" | "moveTo" => Some(Action::MoveTo),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveForward => "move_forward",
            Action::TurnLeft => "turn_left",
            Action::TurnRight => "turn_right",
            Action::Collect => "collect",
            Action::MoveTo => "move_to",
        }
    }
}

/// Built-in query and mutation operations on the puzzle world and on the
/// learner's data structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Builtin {
    PathAhead,
    AtGoal,
    Neighbors,
    Length,
    Get,
    Contains,
    Append,
    Pop,
    Set,
}

impl Builtin {
    pub fn from_block_type(block_type: &str) -> Option<Builtin> {
        match block_type {
            "is_path_ahead" => Some(Builtin::PathAhead),
            "at_goal" => Some(Builtin::AtGoal),
            "graph_get_neighbors" => Some(Builtin::Neighbors),
            "lists_length" => Some(Builtin::Length),
            "lists_getIndex" | "dict_get" => Some(Builtin::Get),
            "lists_contains" => Some(Builtin::Contains),
            "list_push" | "lists_append" => Some(Builtin::Append),
            "list_pop" => Some(Builtin::Pop),
            "dict_set" | "lists_setIndex" => Some(Builtin::Set),
            _ => None,
        }
    }

    /// Builtins written as free functions, `neighbors(node)`.
    pub fn from_function(name: &str) -> Option<Builtin> {
        match name {
            "path_ahead" | "is_path_ahead" | "pathAhead" => Some(Builtin::PathAhead),
            "at_goal" | "atGoal" => Some(Builtin::AtGoal),
            "neighbors" | "get_neighbors" | "getNeighbors" => Some(Builtin::Neighbors),
            "len" | "length" => Some(Builtin::Length),
            _ => None,
        }
    }

    /// Builtins written as methods on their receiver, `queue.pop()`.
    pub fn from_method(name: &str) -> Option<Builtin> {
        match name {
            "append" | "push" => Some(Builtin::Append),
            "pop" | "shift" => Some(Builtin::Pop),
            "contains" | "includes" => Some(Builtin::Contains),
            "get" => Some(Builtin::Get),
            "set" => Some(Builtin::Set),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::PathAhead => "path_ahead",
            Builtin::AtGoal => "at_goal",
            Builtin::Neighbors => "neighbors",
            Builtin::Length => "len",
            Builtin::Get => "get",
            Builtin::Contains => "contains",
            Builtin::Append => "append",
            Builtin::Pop => "pop",
            Builtin::Set => "set",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    Return,
    Break,
    Continue,
}

impl Terminal {
    pub fn name(&self) -> &'static str {
        match self {
            Terminal::Return => "return",
            Terminal::Break => "break",
            Terminal::Continue => "continue",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Number(i64),
    Text(String),
    Boolean(bool),
    List,
}

impl ProgramNode {
    pub fn new(id: impl Into<String>, form: Form) -> ProgramNode {
        ProgramNode {
            id: id.into(),
            form,
            inputs: Vec::new(),
            has_next: false,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<ProgramNode>) -> ProgramNode {
        self.inputs = inputs;
        self
    }

    pub fn kind(&self) -> Kind {
        match &self.form {
            Form::Action { action } => Kind::Action(*action),
            Form::Assignment { .. } => Kind::Assignment,
            Form::Call { builtin } => Kind::Call(*builtin),
            Form::Conditional { .. } => Kind::Conditional,
            Form::Repeat { .. } => Kind::Repeat,
            Form::While { .. } => Kind::While,
            Form::For { .. } => Kind::For,
            Form::ForEach { .. } => Kind::ForEach,
            Form::ProcedureDefinition { .. } => Kind::ProcedureDefinition,
            Form::ProcedureCall { .. } => Kind::ProcedureCall,
            Form::Terminal { terminal } => Kind::Terminal(*terminal),
            Form::Compare { .. } => Kind::Compare,
            Form::Combine => Kind::Combine,
            Form::Negate => Kind::Negate,
            Form::Literal { .. } => Kind::Literal,
            Form::Variable { .. } => Kind::Variable,
            Form::Arithmetic => Kind::Arithmetic,
        }
    }

    pub fn variable_name(&self) -> Option<&str> {
        match &self.form {
            Form::Assignment { variable } | Form::Variable { variable } => Some(variable),
            _ => None,
        }
    }

    pub fn procedure_name(&self) -> Option<&str> {
        match &self.form {
            Form::ProcedureDefinition { name, .. } | Form::ProcedureCall { name } => Some(name),
            _ => None,
        }
    }

    /// The nested statement block, if this kind has one. An empty slice
    /// means the body is present but nothing has been placed in it yet.
    pub fn body(&self) -> Option<&[ProgramNode]> {
        match &self.form {
            Form::Conditional { body, .. }
            | Form::Repeat { body }
            | Form::While { body }
            | Form::For { body }
            | Form::ForEach { body }
            | Form::ProcedureDefinition { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn alternate(&self) -> Option<&[ProgramNode]> {
        match &self.form {
            Form::Conditional {
                alternate: Some(alternate),
                ..
            } => Some(alternate),
            _ => None,
        }
    }

    pub fn has_implicit_else(&self) -> bool {
        matches!(
            self.form,
            Form::Conditional {
                implicit_else: true,
                ..
            }
        )
    }

    /// The raw condition text carried by a comparison that could not be
    /// decomposed further.
    pub fn source_text(&self) -> Option<&str> {
        match &self.form {
            Form::Compare {
                source: Some(source),
            } => Some(source),
            _ => None,
        }
    }

    /// The name this node is identified by, if any: a variable for
    /// assignments and references, a procedure for definitions and calls.
    pub fn name(&self) -> Option<&str> {
        self.variable_name()
            .or_else(|| self.procedure_name())
    }
}

/// Build the node for an assignment statement. When the value being stored
/// is itself a call, the statement is identified by that call rather than by
/// the incidental variable receiving its result.
pub fn assignment(id: impl Into<String>, variable: &str, value: Option<ProgramNode>) -> ProgramNode {
    match value {
        Some(value)
            if value
                .kind()
                .is_call_like() =>
        {
            ProgramNode {
                id: id.into(),
                form: value.form,
                inputs: value.inputs,
                has_next: false,
            }
        }
        Some(value) => ProgramNode::new(
            id,
            Form::Assignment {
                variable: variable.to_string(),
            },
        )
        .with_inputs(vec![value]),
        None => ProgramNode::new(
            id,
            Form::Assignment {
                variable: variable.to_string(),
            },
        ),
    }
}

/// Whether assigning `value` to `variable` is just a counter step such as
/// `i = i + 1`, which is bookkeeping rather than program structure.
pub fn is_increment(variable: &str, value: &ProgramNode) -> bool {
    if value.kind() != Kind::Arithmetic {
        return false;
    }

    match value
        .inputs
        .as_slice()
    {
        [left, right] => {
            left.variable_name() == Some(variable)
                && matches!(
                    right.form,
                    Form::Literal {
                        value: Literal::Number(1)
                    }
                )
        }
        _ => false,
    }
}

/// Ensure a procedure body ends in a terminal, so that falling off the end
/// of a procedure and an explicit `return` look identical.
pub fn terminate(owner: &str, mut body: Vec<ProgramNode>) -> Vec<ProgramNode> {
    let ends_in_terminal = body
        .last()
        .map(|node| {
            node.kind()
                .is_terminal()
        })
        .unwrap_or(false);

    if !ends_in_terminal {
        body.push(ProgramNode::new(
            format!("{}:return", owner),
            Form::Terminal {
                terminal: Terminal::Return,
            },
        ));
    }

    link(&mut body);
    body
}

/// Mark every node but the last in a statement chain as having a successor.
pub fn link(nodes: &mut [ProgramNode]) {
    let count = nodes.len();
    for (i, node) in nodes
        .iter_mut()
        .enumerate()
    {
        node.has_next = i + 1 < count;
    }
}

/// Number of iterations of a counted loop with literal bounds, where `to`
/// is inclusive. Returns None for a zero step, for bounds that run the wrong
/// way for the step, and for counts that do not fit in an i64.
pub fn iterations(from: i64, to: i64, by: i64) -> Option<i64> {
    if by == 0 {
        return None;
    }
    let span = to.checked_sub(from)?;
    if span != 0 && span.signum() != by.signum() {
        return None;
    }
    span.checked_div(by)?
        .checked_add(1)
}

pub fn validate_identifier(input: &str) -> Option<&str> {
    if input.is_empty() {
        return None;
    }

    let re = regex!(r"^[A-Za-z_][A-Za-z0-9_]*$");
    if re.is_match(input) {
        Some(input)
    } else {
        None
    }
}
