//! Parser for the brace-delimited pseudocode learners write in the text
//! editor. Statements are line oriented; blocks are delimited by braces.

use tracing::debug;

use super::expression::parse_expression;
use crate::language::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    IllegalParserState(usize),
    Unrecognized(usize),
    Expected(usize, &'static str),
    UnclosedBlock(usize),
    UnexpectedBrace(usize),
    DanglingElse(usize),
    InvalidExpression(usize),
    InvalidLoop(usize),
    InvalidFunction(usize),
    InvalidIdentifier(usize, String),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::IllegalParserState(offset) => *offset,
            ParsingError::Unrecognized(offset) => *offset,
            ParsingError::Expected(offset, _) => *offset,
            ParsingError::UnclosedBlock(offset) => *offset,
            ParsingError::UnexpectedBrace(offset) => *offset,
            ParsingError::DanglingElse(offset) => *offset,
            ParsingError::InvalidExpression(offset) => *offset,
            ParsingError::InvalidLoop(offset) => *offset,
            ParsingError::InvalidFunction(offset) => *offset,
            ParsingError::InvalidIdentifier(offset, _) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::IllegalParserState(_) => "illegal parser state".to_string(),
            ParsingError::Unrecognized(_) => "unrecognized statement".to_string(),
            ParsingError::Expected(_, value) => format!("expected {}", value),
            ParsingError::UnclosedBlock(_) => "block opened here is never closed".to_string(),
            ParsingError::UnexpectedBrace(_) => "closing brace without a matching opening brace".to_string(),
            ParsingError::DanglingElse(_) => "else without a preceding if".to_string(),
            ParsingError::InvalidExpression(_) => "invalid expression".to_string(),
            ParsingError::InvalidLoop(_) => "invalid loop header".to_string(),
            ParsingError::InvalidFunction(_) => "invalid function definition".to_string(),
            ParsingError::InvalidIdentifier(_, name) => format!("invalid identifier '{}'", name),
        }
    }
}

#[derive(Debug)]
pub struct Parser<'i> {
    original: &'i str,
    source: &'i str,
    offset: usize,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser {
            original: "",
            source: "",
            offset: 0,
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.original = content;
        self.source = content;
        self.offset = 0;
    }

    fn advance(&mut self, width: usize) {
        // advance the parser position
        self.source = &self.source[width..];
        self.offset += width;
    }

    fn entire(&self) -> &'i str {
        self.source
    }

    fn is_finished(&self) -> bool {
        self.source
            .is_empty()
    }

    fn subparser(&self, indent: usize, content: &'i str) -> Parser<'i> {
        Parser {
            original: self.original,
            source: content,
            offset: indent + self.offset,
        }
    }

    /// One-based line number of the given offset into the original input.
    fn line_number(&self, offset: usize) -> usize {
        let end = offset.min(
            self.original
                .len(),
        );
        self.original[..end]
            .matches('\n')
            .count()
            + 1
    }

    /// Statement ids name the line they start on, which is what an editor
    /// needs in order to point back at the statement.
    fn node_id(&self) -> String {
        format!("line:{}", self.line_number(self.offset))
    }

    fn trim_whitespace(&mut self) {
        let l = self.source.len()
            - self
                .source
                .trim_start()
                .len();
        self.advance(l);
    }

    /// Skip blank lines and whole-line comments.
    fn trim_insignificant(&mut self) {
        loop {
            self.trim_whitespace();
            if is_comment(self.source) {
                let end = self
                    .source
                    .find('\n')
                    .unwrap_or(
                        self.source
                            .len(),
                    );
                self.advance(end);
            } else {
                break;
            }
        }
    }

    fn take_until<A, F>(&mut self, pattern: &[char], function: F) -> Result<A, ParsingError>
    where
        F: Fn(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let content = self.source;
        let end_pos = content
            .find(pattern)
            .unwrap_or(content.len());

        let block = &content[..end_pos];
        let mut parser = self.subparser(0, block);

        let result = function(&mut parser)?;

        self.advance(end_pos);

        Ok(result)
    }

    /// consume up to and including the newline (or end)
    fn take_line<A, F>(&mut self, f: F) -> Result<A, ParsingError>
    where
        F: Fn(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let result = self.take_until(&['\n'], f)?;
        if self
            .source
            .starts_with('\n')
        {
            self.advance(1);
        }
        Ok(result)
    }

    /// Consume the text from here up to the opening brace of a block, which
    /// must be on the same line. Returns that text and its offset, leaving
    /// the parser on the brace.
    fn take_header(&mut self) -> Result<(&'i str, usize), ParsingError> {
        let at = self.offset;
        let end = match find_outside_strings(self.source, '{') {
            Some(end) => end,
            None => return Err(ParsingError::Expected(at, "'{' to open the block")),
        };

        let header = &self.source[..end];
        if header
            .trim_end()
            .contains('\n')
        {
            return Err(ParsingError::Expected(at, "'{' to open the block"));
        }

        self.advance(end);
        Ok((header, at))
    }

    /// Given the parser sitting on an opening brace, hand everything up to
    /// the matching closing brace to `function` and consume both braces.
    fn take_braced<A, F>(&mut self, function: F) -> Result<A, ParsingError>
    where
        F: Fn(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        if !self
            .source
            .starts_with('{')
        {
            return Err(ParsingError::Expected(self.offset, "'{' to open the block"));
        }

        let l = match find_matching_brace(self.source) {
            Some(end) => end + 1,
            None => return Err(ParsingError::UnclosedBlock(self.offset)),
        };

        let block = &self.source[1..l - 1];
        let mut parser = self.subparser(1, block);

        let result = function(&mut parser)?;

        self.advance(l);

        Ok(result)
    }

    /// Read statements until the input is exhausted.
    pub fn read_statements(&mut self) -> Result<Vec<ProgramNode>, ParsingError> {
        let mut nodes = Vec::new();

        loop {
            self.trim_insignificant();
            if self.is_finished() {
                break;
            }

            if self
                .source
                .starts_with('}')
            {
                return Err(ParsingError::UnexpectedBrace(self.offset));
            }

            if let Some(node) = self.read_statement()? {
                nodes.push(node);
            }
        }

        link(&mut nodes);
        Ok(nodes)
    }

    /// Read one statement. Statements that carry no program structure, such
    /// as counter increments and visualization calls, are consumed and
    /// give None.
    fn read_statement(&mut self) -> Result<Option<ProgramNode>, ParsingError> {
        let content = self.entire();

        if is_conditional(content) {
            self.read_conditional()
                .map(Some)
        } else if is_else(content) {
            Err(ParsingError::DanglingElse(self.offset))
        } else if is_repeat(content) {
            self.read_repeat()
                .map(Some)
        } else if is_for(content) {
            self.read_for()
                .map(Some)
        } else if is_while(content) {
            self.read_while()
                .map(Some)
        } else if is_definition(content) {
            self.read_definition()
                .map(Some)
        } else if is_terminal(content) {
            self.read_terminal()
                .map(Some)
        } else if is_counter_step(content) || is_hook(content) {
            let id = self.node_id();
            self.take_line(|_| Ok(()))?;
            debug!("Skipping bookkeeping statement at {}", id);
            Ok(None)
        } else if is_declaration(content) {
            self.read_declaration()
        } else if is_index_assignment(content) {
            self.read_index_assignment()
                .map(Some)
        } else if is_assignment(content) {
            self.read_assignment()
        } else if is_call(content) {
            self.read_call()
                .map(Some)
        } else {
            Err(ParsingError::Unrecognized(self.offset))
        }
    }

    fn read_conditional(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        self.advance("if".len());
        self.read_conditional_rest(id)
    }

    fn read_conditional_rest(&mut self, id: String) -> Result<ProgramNode, ParsingError> {
        let (header, at) = self.take_header()?;
        let condition = condition(header, at, &id)?;

        let body = self.take_braced(|inner| inner.read_statements())?;
        let alternate = self.read_alternate()?;

        Ok(ProgramNode::new(
            id,
            Form::Conditional {
                body,
                alternate,
                implicit_else: false,
            },
        )
        .with_inputs(vec![condition]))
    }

    /// After the body of a conditional, an optional `else` branch. An
    /// `else if` (or `elif`) is a conditional nested in the else branch.
    fn read_alternate(&mut self) -> Result<Option<Vec<ProgramNode>>, ParsingError> {
        self.trim_whitespace();

        let content = self.entire();
        if !is_else(content) {
            return Ok(None);
        }

        if content.starts_with("elif") {
            let id = self.node_id();
            self.advance("elif".len());
            let nested = self.read_conditional_rest(id)?;
            return Ok(Some(vec![nested]));
        }

        self.advance("else".len());
        self.trim_whitespace();

        let content = self.entire();
        if is_conditional(content) {
            let nested = self.read_conditional()?;
            Ok(Some(vec![nested]))
        } else if content.starts_with('{') {
            let body = self.take_braced(|inner| inner.read_statements())?;
            Ok(Some(body))
        } else {
            Err(ParsingError::Expected(self.offset, "'{' after else"))
        }
    }

    fn read_repeat(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        self.advance("repeat".len());

        let (header, at) = self.take_header()?;
        let re = regex!(r"^\s*\(?\s*(.+?)\s*\)?\s*(?:times)?\s*$");
        let count = match re.captures(header) {
            Some(cap) => {
                let text = cap
                    .get(1)
                    .ok_or(ParsingError::IllegalParserState(at))?;
                parse_expression(text.as_str(), at + text.start(), &id)?
            }
            None => return Err(ParsingError::InvalidLoop(at)),
        };

        let body = self.take_braced(|inner| inner.read_statements())?;

        Ok(ProgramNode::new(id, Form::Repeat { body }).with_inputs(vec![count]))
    }

    fn read_while(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        let negated = self
            .source
            .starts_with("until");
        let keyword = if negated { "until" } else { "while" };
        self.advance(keyword.len());

        let (header, at) = self.take_header()?;
        let mut condition = condition(header, at, &id)?;
        if negated {
            condition = ProgramNode::new(format!("{}:until", id), Form::Negate).with_inputs(vec![condition]);
        }

        let body = self.take_braced(|inner| inner.read_statements())?;

        Ok(ProgramNode::new(id, Form::While { body }).with_inputs(vec![condition]))
    }

    /// The several ways learners write a counted or collection loop. A
    /// counted loop whose bounds are all literal is a repeat.
    fn read_for(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        self.advance("for".len());

        let (raw, at) = self.take_header()?;
        let header = raw.trim();
        let header = match header
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
        {
            Some(inner) => inner.trim(),
            None => header,
        };

        let counted = regex!(
            r"^(?:let\s+|var\s+|int\s+)?([A-Za-z_]\w*)\s*=\s*(.+?)\s*;\s*[A-Za-z_]\w*\s*(<=|<|>=|>|!=)\s*(.+?)\s*;.*$"
        );
        let ranged = regex!(r"^([A-Za-z_]\w*)\s+in\s+range\s*\((.*)\)$");
        let stepped = regex!(r"^([A-Za-z_]\w*)\s+from\s+(.+?)\s+to\s+(.+?)(?:\s+by\s+(.+))?$");
        let each = regex!(r"^(?:let\s+|const\s+|var\s+)?([A-Za-z_]\w*)\s+(?:in|of)\s+(.+)$");

        let node = if let Some(cap) = counted.captures(header) {
            let from = parse_expression(&cap[2], at + position(raw, &cap[2]), &format!("{}.from", id))?;
            let to = parse_expression(&cap[4], at + position(raw, &cap[4]), &format!("{}.to", id))?;

            let count = match (literal_number(&from), literal_number(&to)) {
                (Some(a), Some(b)) => match &cap[3] {
                    "<" | "!=" => b.checked_sub(a),
                    "<=" => b
                        .checked_sub(a)
                        .and_then(|n| n.checked_add(1)),
                    ">" => a.checked_sub(b),
                    ">=" => a
                        .checked_sub(b)
                        .and_then(|n| n.checked_add(1)),
                    _ => None,
                },
                _ => None,
            };
            counted_loop(&id, count, vec![from, to])
        } else if let Some(cap) = ranged.captures(header) {
            let arguments: Vec<ProgramNode> = split_arguments(&cap[2])
                .into_iter()
                .enumerate()
                .map(|(i, text)| parse_expression(text, at + position(raw, text), &format!("{}.{}", id, i)))
                .collect::<Result<_, _>>()?;

            let literals: Option<Vec<i64>> = arguments
                .iter()
                .map(literal_number)
                .collect();

            let count = match literals.as_deref() {
                Some([n]) => Some(*n),
                Some([a, b]) => b.checked_sub(*a),
                Some([a, b, step]) if *step != 0 => {
                    // exclusive upper bound
                    b.checked_sub(*a)
                        .and_then(|span| span.checked_add(*step))
                        .and_then(|n| n.checked_sub(step.signum()))
                        .and_then(|n| n.checked_div(*step))
                }
                _ => None,
            };
            counted_loop(&id, count, arguments)
        } else if let Some(cap) = stepped.captures(header) {
            let from = parse_expression(&cap[2], at + position(raw, &cap[2]), &format!("{}.from", id))?;
            let to = parse_expression(&cap[3], at + position(raw, &cap[3]), &format!("{}.to", id))?;
            let mut bounds = vec![from, to];
            if let Some(by) = cap.get(4) {
                let by = by.as_str();
                bounds.push(parse_expression(by, at + position(raw, by), &format!("{}.by", id))?);
            }

            let step = match bounds.get(2) {
                Some(by) => literal_number(by),
                None => Some(1),
            };
            let count = match (literal_number(&bounds[0]), literal_number(&bounds[1]), step) {
                (Some(from), Some(to), Some(by)) => iterations(from, to, by),
                _ => None,
            };
            counted_loop(&id, count, bounds)
        } else if let Some(cap) = each.captures(header) {
            let collection = parse_expression(&cap[2], at + position(raw, &cap[2]), &format!("{}.0", id))?;
            ProgramNode::new(id.as_str(), Form::ForEach { body: Vec::new() }).with_inputs(vec![collection])
        } else {
            return Err(ParsingError::InvalidLoop(at));
        };

        let body = self.take_braced(|inner| inner.read_statements())?;

        Ok(with_body(node, body))
    }

    fn read_definition(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        let keyword = regex!(r"^(?:def|function|func|fn)\b");
        let width = keyword
            .find(self.source)
            .map(|m| m.end())
            .ok_or(ParsingError::IllegalParserState(self.offset))?;
        self.advance(width);

        let (header, at) = self.take_header()?;
        let re = regex!(r"^\s*([A-Za-z_]\w*)\s*\(([^)]*)\)\s*(?:->\s*\w+\s*)?$");
        let name = match re.captures(header) {
            Some(cap) => cap[1].to_string(),
            None => return Err(ParsingError::InvalidFunction(at)),
        };

        let body = self.take_braced(|inner| inner.read_statements())?;
        let body = terminate(&id, body);

        Ok(ProgramNode::new(id, Form::ProcedureDefinition { name, body }))
    }

    fn read_terminal(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        self.take_line(|inner| {
            let text = statement_text(inner.source);
            let (keyword, rest) = match text.split_once(char::is_whitespace) {
                Some((keyword, rest)) => (keyword, rest.trim()),
                None => (text, ""),
            };

            let terminal = match keyword {
                "return" => Terminal::Return,
                "break" => Terminal::Break,
                "continue" => Terminal::Continue,
                _ => return Err(ParsingError::IllegalParserState(inner.offset)),
            };

            let mut node = ProgramNode::new(id.as_str(), Form::Terminal { terminal });
            if !rest.is_empty() {
                let value = parse_expression(rest, inner.offset + position(inner.source, rest), &id)?;
                node = node.with_inputs(vec![value]);
            }
            Ok(node)
        })
    }

    fn read_declaration(&mut self) -> Result<Option<ProgramNode>, ParsingError> {
        let id = self.node_id();
        self.take_line(|inner| {
            let text = statement_text(inner.source);
            let re = regex!(r"^(?:let|var|const)\s+(?:mut\s+)?([^=:]+?)\s*(?::\s*\w+\s*)?(?:=\s*(.+))?$");
            let cap = re
                .captures(text)
                .ok_or(ParsingError::Unrecognized(inner.offset))?;

            let name = cap[1].trim();
            let name = validate_identifier(name)
                .ok_or_else(|| ParsingError::InvalidIdentifier(inner.offset, name.to_string()))?;

            match cap.get(2) {
                Some(value) => {
                    let value = value.as_str();
                    let value = parse_expression(value, inner.offset + position(inner.source, value), &id)?;
                    if is_increment(name, &value) {
                        return Ok(None);
                    }
                    Ok(Some(assignment(id.as_str(), name, Some(value))))
                }
                None => Ok(Some(assignment(id.as_str(), name, None))),
            }
        })
    }

    fn read_assignment(&mut self) -> Result<Option<ProgramNode>, ParsingError> {
        let id = self.node_id();
        self.take_line(|inner| {
            let text = statement_text(inner.source);
            let (name, value) = text
                .split_once('=')
                .ok_or(ParsingError::IllegalParserState(inner.offset))?;

            let name = name.trim();
            let name = validate_identifier(name)
                .ok_or_else(|| ParsingError::InvalidIdentifier(inner.offset, name.to_string()))?;

            let value = value.trim();
            let value = parse_expression(value, inner.offset + position(inner.source, value), &id)?;
            if is_increment(name, &value) {
                debug!("Skipping counter increment at {}", id);
                return Ok(None);
            }

            Ok(Some(assignment(id.as_str(), name, Some(value))))
        })
    }

    /// `seen[key] = value` is a set operation on the container.
    fn read_index_assignment(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        self.take_line(|inner| {
            let text = statement_text(inner.source);
            let re = regex!(r"^([A-Za-z_]\w*)\s*\[(.+)\]\s*[+\-*/]?=\s*(.+)$");
            let cap = re
                .captures(text)
                .ok_or(ParsingError::Unrecognized(inner.offset))?;

            let container = ProgramNode::new(
                format!("{}.target", id),
                Form::Variable {
                    variable: cap[1].to_string(),
                },
            );
            let key = parse_expression(
                &cap[2],
                inner.offset + position(inner.source, &cap[2]),
                &format!("{}.key", id),
            )?;
            let value = parse_expression(
                &cap[3],
                inner.offset + position(inner.source, &cap[3]),
                &format!("{}.value", id),
            )?;

            Ok(ProgramNode::new(
                id.as_str(),
                Form::Call {
                    builtin: Builtin::Set,
                },
            )
            .with_inputs(vec![container, key, value]))
        })
    }

    fn read_call(&mut self) -> Result<ProgramNode, ParsingError> {
        let id = self.node_id();
        self.take_line(|inner| {
            let text = statement_text(inner.source);
            let mut node = parse_expression(text, inner.offset + position(inner.source, text), &id)?;

            match node.kind() {
                Kind::Action(_) | Kind::Call(_) | Kind::ProcedureCall => {
                    node.id = id.clone();
                    Ok(node)
                }
                _ => Err(ParsingError::Unrecognized(inner.offset)),
            }
        })
    }
}

/// Parse a condition. Text that does not decompose into an expression is
/// kept whole as an opaque comparison so the statement around it still
/// parses.
fn condition(header: &str, at: usize, id: &str) -> Result<ProgramNode, ParsingError> {
    let text = header.trim();
    let text = match text
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) if balanced(inner) => inner.trim(),
        _ => text,
    };
    let text = text
        .strip_suffix(':')
        .unwrap_or(text)
        .trim();

    if text.is_empty() {
        return Err(ParsingError::Expected(at, "a condition"));
    }

    match parse_expression(text, at + position(header, text), id) {
        Ok(node) => Ok(node),
        Err(error) => {
            debug!("Keeping condition '{}' whole: {:?}", text, error);
            Ok(ProgramNode::new(
                format!("{}.0", id),
                Form::Compare {
                    source: Some(text.to_string()),
                },
            ))
        }
    }
}

/// Byte offset of `part` within `whole`, of which it must be a subslice.
fn position(whole: &str, part: &str) -> usize {
    (part.as_ptr() as usize).saturating_sub(whole.as_ptr() as usize)
}

fn counted_loop(id: &str, count: Option<i64>, bounds: Vec<ProgramNode>) -> ProgramNode {
    match count {
        Some(count) if count >= 0 => ProgramNode::new(id, Form::Repeat { body: Vec::new() }).with_inputs(vec![
            ProgramNode::new(
                format!("{}:count", id),
                Form::Literal {
                    value: Literal::Number(count),
                },
            ),
        ]),
        _ => ProgramNode::new(id, Form::For { body: Vec::new() }).with_inputs(bounds),
    }
}

fn with_body(mut node: ProgramNode, statements: Vec<ProgramNode>) -> ProgramNode {
    match &mut node.form {
        Form::Repeat { body } | Form::For { body } | Form::ForEach { body } => *body = statements,
        _ => {}
    }
    node
}

fn literal_number(node: &ProgramNode) -> Option<i64> {
    match node.form {
        Form::Literal {
            value: Literal::Number(n),
        } => Some(n),
        _ => None,
    }
}

/// Split call arguments on top-level commas.
fn split_arguments(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = text[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}

fn balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// The meaningful part of a single statement line: no trailing comment and
/// no trailing semicolon.
fn statement_text(line: &str) -> &str {
    let line = match find_outside_strings(line, '/') {
        Some(i) if line[i..].starts_with("//") => &line[..i],
        _ => line,
    };
    line.trim()
        .trim_end_matches(';')
        .trim_end()
}

/// Position of the first `wanted` character not inside a string literal.
fn find_outside_strings(content: &str, wanted: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c == wanted {
            return Some(i);
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        }
    }
    None
}

/// Offset of the brace closing the one `content` starts with. Braces inside
/// strings and comments are not counted.
fn find_matching_brace(content: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut comment = false;
    let mut previous = '\n';

    for (i, c) in content.char_indices() {
        if comment {
            if c == '\n' {
                comment = false;
            }
            previous = c;
            continue;
        }

        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            previous = c;
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '#' => comment = true,
            '/' if previous == '/' => comment = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        previous = c;
    }

    None
}

fn is_comment(content: &str) -> bool {
    content.starts_with('#') || content.starts_with("//")
}

fn is_conditional(content: &str) -> bool {
    let re = regex!(r"^if\b");
    re.is_match(content)
}

fn is_else(content: &str) -> bool {
    let re = regex!(r"^(?:else|elif)\b");
    re.is_match(content)
}

fn is_repeat(content: &str) -> bool {
    let re = regex!(r"^repeat\b");
    re.is_match(content)
}

fn is_for(content: &str) -> bool {
    let re = regex!(r"^for\b");
    re.is_match(content)
}

fn is_while(content: &str) -> bool {
    let re = regex!(r"^(?:while|until)\b");
    re.is_match(content)
}

fn is_definition(content: &str) -> bool {
    let re = regex!(r"^(?:def|function|func|fn)[ \t]+[A-Za-z_]");
    re.is_match(content)
}

fn is_terminal(content: &str) -> bool {
    let re = regex!(r"^(?:return|break|continue)\b");
    re.is_match(content)
}

fn is_counter_step(content: &str) -> bool {
    let re = regex!(r"^(?:[A-Za-z_]\w*[ \t]*(?:\+\+|--|\+=|-=)|(?:\+\+|--)[A-Za-z_])");
    re.is_match(content)
}

/// Calls that only drive the visualization.
fn is_hook(content: &str) -> bool {
    let re = regex!(r"^(?:highlight|highlight_node|visualize|visualize_graph|show_path|wait)[ \t]*\(");
    re.is_match(content)
}

fn is_declaration(content: &str) -> bool {
    let re = regex!(r"^(?:let|var|const)[ \t]+[A-Za-z_]");
    re.is_match(content)
}

fn is_index_assignment(content: &str) -> bool {
    let re = regex!(r"^[A-Za-z_]\w*[ \t]*\[[^\n]*\][ \t]*[+\-*/]?=[^=]");
    re.is_match(content)
}

fn is_assignment(content: &str) -> bool {
    let re = regex!(r"^[A-Za-z_]\w*[ \t]*=[^=]");
    re.is_match(content)
}

fn is_call(content: &str) -> bool {
    let re = regex!(r"^[A-Za-z_][\w.]*[ \t]*\(");
    re.is_match(content)
}
