use crate::core::{CommitType, Direction};
use crate::error::{GitGraphError, Result};

/// A scanned token. Keyed-field keywords include their colon (`id:`), and
/// the capture-mode tokens (`options`, `accTitle`, `accDescr`, `section`)
/// carry their raw payload so the parser never sees the captured text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    GitGraph,
    Commit,
    Branch,
    Merge,
    CherryPick,
    Checkout,
    IdField,
    TypeField,
    MsgField,
    TagField,
    ParentField,
    OrderField,
    Dir(Direction),
    TypeKeyword(CommitType),
    Options(String),
    AccTitle(String),
    AccDescr(String),
    Section(String),
    Str(String),
    EmptyStr,
    Num(i64),
    Ident(String),
    Colon,
    Newline,
    Eof,
}

impl Token {
    /// Human-readable rendering used in syntax error reports.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::GitGraph => "keyword 'gitGraph'".to_string(),
            Token::Commit => "keyword 'commit'".to_string(),
            Token::Branch => "keyword 'branch'".to_string(),
            Token::Merge => "keyword 'merge'".to_string(),
            Token::CherryPick => "keyword 'cherry-pick'".to_string(),
            Token::Checkout => "keyword 'checkout'".to_string(),
            Token::IdField => "'id:'".to_string(),
            Token::TypeField => "'type:'".to_string(),
            Token::MsgField => "'msg:'".to_string(),
            Token::TagField => "'tag:'".to_string(),
            Token::ParentField => "'parent:'".to_string(),
            Token::OrderField => "'order:'".to_string(),
            Token::Dir(_) => "direction keyword".to_string(),
            Token::TypeKeyword(_) => "commit type keyword".to_string(),
            Token::Options(_) => "options block".to_string(),
            Token::AccTitle(_) => "accessibility title".to_string(),
            Token::AccDescr(_) => "accessibility description".to_string(),
            Token::Section(_) => "section header".to_string(),
            Token::Str(s) => format!("string \"{s}\""),
            Token::EmptyStr => "empty string".to_string(),
            Token::Num(n) => format!("number {n}"),
            Token::Ident(s) => format!("identifier '{s}'"),
            Token::Colon => "':'".to_string(),
            Token::Newline => "end of line".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
}

/// Scan DSL source into a token stream terminated by `Token::Eof`.
/// Runs of newlines, blank lines and comments collapse into one `Newline`.
pub fn lex(input: &str) -> Result<Vec<SpannedToken>> {
    Lexer {
        input,
        pos: 0,
        line: 1,
    }
    .run()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn run(mut self) -> Result<Vec<SpannedToken>> {
        let mut out: Vec<SpannedToken> = Vec::new();
        loop {
            self.skip_inline_ws();
            let line = self.line;
            let Some(b) = self.peek() else {
                out.push(SpannedToken {
                    token: Token::Eof,
                    line,
                });
                return Ok(out);
            };
            match b {
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    push_newline(&mut out, line);
                }
                b';' => {
                    self.pos += 1;
                    push_newline(&mut out, line);
                }
                b':' => {
                    self.pos += 1;
                    out.push(SpannedToken {
                        token: Token::Colon,
                        line,
                    });
                }
                b'"' => {
                    let token = self.string_literal()?;
                    out.push(SpannedToken { token, line });
                }
                _ if b.is_ascii_alphanumeric() || b == b'_' => {
                    let token = self.word_token()?;
                    out.push(SpannedToken { token, line });
                }
                _ => {
                    return Err(GitGraphError::Lexical {
                        line,
                        near: self.input[self.pos..].chars().take(10).collect(),
                    });
                }
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Spaces, tabs, carriage returns and `#`/`%` line comments.
    fn skip_inline_ws(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'#' | b'%' => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    /// Quoted literal with no escape processing; `""` is the explicit
    /// empty string.
    fn string_literal(&mut self) -> Result<Token> {
        let open_line = self.line;
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'"' {
                let value = &self.input[start..self.pos];
                self.pos += 1;
                return Ok(if value.is_empty() {
                    Token::EmptyStr
                } else {
                    Token::Str(value.to_string())
                });
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
        Err(GitGraphError::Lexical {
            line: open_line,
            near: "\"".to_string(),
        })
    }

    /// Identifier characters per the DSL: word chars plus `-`, `.`, `/`,
    /// where the final character may not be `.` or `/`.
    fn scan_word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'/') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let mut end = self.pos;
        while end > start + 1 && matches!(self.input.as_bytes()[end - 1], b'.' | b'/') {
            end -= 1;
        }
        self.pos = end;
        &self.input[start..end]
    }

    fn rest_of_line(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
        self.input[start..self.pos].trim().to_string()
    }

    /// One full line including its terminator; `None` at end of input.
    fn take_line(&mut self) -> Option<String> {
        if self.pos >= self.input.len() {
            return None;
        }
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
        let text = self.input[start..self.pos].to_string();
        if self.peek() == Some(b'\n') {
            self.pos += 1;
            self.line += 1;
        }
        Some(text)
    }

    fn word_token(&mut self) -> Result<Token> {
        let line = self.line;
        let word = self.scan_word();

        // keyed fields swallow their colon
        if self.peek() == Some(b':') {
            let field = [
                ("id", Token::IdField),
                ("type", Token::TypeField),
                ("msg", Token::MsgField),
                ("tag", Token::TagField),
                ("parent", Token::ParentField),
                ("order", Token::OrderField),
            ]
            .into_iter()
            .find(|(kw, _)| word.eq_ignore_ascii_case(kw));
            if let Some((_, token)) = field {
                self.pos += 1;
                return Ok(token);
            }
            if word.eq_ignore_ascii_case("accTitle") {
                self.pos += 1;
                return Ok(Token::AccTitle(self.rest_of_line()));
            }
            if word.eq_ignore_ascii_case("accDescr") {
                self.pos += 1;
                return Ok(Token::AccDescr(self.rest_of_line()));
            }
        }

        if word.eq_ignore_ascii_case("accDescr") {
            return self.acc_descr_block(line);
        }
        if word.eq_ignore_ascii_case("options") {
            return self.options_block(line);
        }
        if word.eq_ignore_ascii_case("section") {
            return Ok(Token::Section(self.rest_of_line()));
        }

        let token = match word.to_ascii_lowercase().as_str() {
            "gitgraph" => Token::GitGraph,
            "commit" => Token::Commit,
            "branch" => Token::Branch,
            "merge" => Token::Merge,
            "cherry-pick" => Token::CherryPick,
            "checkout" => Token::Checkout,
            "lr" => Token::Dir(Direction::LR),
            "tb" => Token::Dir(Direction::TB),
            "bt" => Token::Dir(Direction::BT),
            "rl" => Token::Dir(Direction::RL),
            "normal" => Token::TypeKeyword(CommitType::Normal),
            "reverse" => Token::TypeKeyword(CommitType::Reverse),
            "highlight" => Token::TypeKeyword(CommitType::Highlight),
            _ => word
                .parse::<i64>()
                .map(Token::Num)
                .unwrap_or_else(|_| Token::Ident(word.to_string())),
        };
        Ok(token)
    }

    /// Brace-delimited multi-line accessibility description.
    fn acc_descr_block(&mut self, line: usize) -> Result<Token> {
        self.skip_inline_ws();
        if self.peek() != Some(b'{') {
            // bare `accDescr` with neither ':' nor '{' is just a name
            return Ok(Token::Ident("accDescr".to_string()));
        }
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'}' {
                let body = self.input[start..self.pos].trim().to_string();
                self.pos += 1;
                return Ok(Token::AccDescr(body));
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
        Err(GitGraphError::Lexical {
            line,
            near: "accDescr {".to_string(),
        })
    }

    /// Raw pass-through mode: everything after `options` up to a line
    /// reading `end` is captured verbatim, so embedded JSON is never
    /// tokenized.
    fn options_block(&mut self, line: usize) -> Result<Token> {
        self.skip_inline_ws();
        match self.peek() {
            Some(b'\n') => {
                self.pos += 1;
                self.line += 1;
            }
            _ => {
                return Err(GitGraphError::Lexical {
                    line,
                    near: "options".to_string(),
                });
            }
        }
        let mut body = String::new();
        loop {
            match self.take_line() {
                Some(text) if text.trim().eq_ignore_ascii_case("end") => {
                    return Ok(Token::Options(body));
                }
                Some(text) => {
                    body.push_str(&text);
                    body.push('\n');
                }
                None => {
                    return Err(GitGraphError::Lexical {
                        line,
                        near: "options".to_string(),
                    });
                }
            }
        }
    }
}

fn push_newline(out: &mut Vec<SpannedToken>, line: usize) {
    if !matches!(
        out.last(),
        Some(SpannedToken {
            token: Token::Newline,
            ..
        })
    ) {
        out.push(SpannedToken {
            token: Token::Newline,
            line,
        });
    }
}
