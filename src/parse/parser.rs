use super::lexer::{lex, SpannedToken, Token};
use super::{CherryPickFields, CommitFields, Document, MergeFields, Statement};
use crate::error::{GitGraphError, Result};

const STATEMENT_KEYWORDS: &[&str] = &[
    "'commit'",
    "'branch'",
    "'merge'",
    "'cherry-pick'",
    "'checkout'",
    "a direction keyword",
    "'accTitle:'",
    "'accDescr'",
    "'section'",
];

/// Parse DSL source into a [`Document`].
pub fn parse(input: &str) -> Result<Document> {
    let tokens = lex(input)?;
    Parser { tokens: &tokens, pos: 0 }.document()
}

struct Parser<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &'a Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].token
    }

    fn line(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)].line
    }

    fn bump(&mut self) -> &'a Token {
        let token = self.peek();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_newlines(&mut self) {
        while self.eat(&Token::Newline) {}
    }

    fn unexpected(&self, expected: &[&str]) -> GitGraphError {
        GitGraphError::Syntax {
            line: self.line(),
            found: self.peek().describe(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn document(&mut self) -> Result<Document> {
        let mut doc = Document::default();
        self.skip_newlines();
        if !self.eat(&Token::GitGraph) {
            return Err(self.unexpected(&["'gitGraph'"]));
        }
        self.eat(&Token::Colon);
        if let Token::Dir(d) = self.peek() {
            doc.direction = Some(*d);
            self.bump();
            self.eat(&Token::Colon);
        }
        if !matches!(self.peek(), Token::Newline | Token::Eof) {
            return Err(self.unexpected(&["end of line"]));
        }
        self.skip_newlines();
        if let Token::Options(raw) = self.peek() {
            doc.options = Some(raw.clone());
            self.bump();
        }
        loop {
            self.skip_newlines();
            if matches!(self.peek(), Token::Eof) {
                return Ok(doc);
            }
            doc.statements.push(self.statement()?);
            if !matches!(self.peek(), Token::Newline | Token::Eof) {
                return Err(self.unexpected(&["end of line"]));
            }
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Token::Commit => {
                self.bump();
                Ok(Statement::Commit(self.commit_fields()?))
            }
            Token::Branch => {
                self.bump();
                let name = self.reference()?;
                let order = if self.eat(&Token::OrderField) {
                    Some(self.number()?)
                } else {
                    None
                };
                Ok(Statement::Branch { name, order })
            }
            Token::Checkout => {
                self.bump();
                Ok(Statement::Checkout {
                    name: self.reference()?,
                })
            }
            Token::Merge => {
                self.bump();
                Ok(Statement::Merge(self.merge_fields()?))
            }
            Token::CherryPick => {
                self.bump();
                Ok(Statement::CherryPick(self.cherry_pick_fields()?))
            }
            Token::Dir(d) => {
                let d = *d;
                self.bump();
                Ok(Statement::Direction(d))
            }
            Token::AccTitle(s) => {
                let s = s.clone();
                self.bump();
                Ok(Statement::AccTitle(s))
            }
            Token::AccDescr(s) => {
                let s = s.clone();
                self.bump();
                Ok(Statement::AccDescr(s))
            }
            Token::Section(s) => {
                let s = s.clone();
                self.bump();
                Ok(Statement::Section(s))
            }
            _ => Err(self.unexpected(STATEMENT_KEYWORDS)),
        }
    }

    /// `commit` takes either a single bare message string or keyed fields
    /// in any order, each at most once.
    fn commit_fields(&mut self) -> Result<CommitFields> {
        let mut fields = CommitFields::default();
        if let Token::Str(msg) = self.peek() {
            fields.message = Some(msg.clone());
            self.bump();
            return Ok(fields);
        }
        loop {
            match self.peek() {
                Token::IdField => {
                    self.bump();
                    set_once(&mut fields.id, self.string("commit id")?, "id:", self.line())?;
                }
                Token::TagField => {
                    self.bump();
                    set_once(&mut fields.tag, self.string("tag")?, "tag:", self.line())?;
                }
                Token::MsgField => {
                    self.bump();
                    set_once(&mut fields.message, self.string("message")?, "msg:", self.line())?;
                }
                Token::TypeField => {
                    self.bump();
                    let t = self.commit_type()?;
                    set_once(&mut fields.commit_type, t, "type:", self.line())?;
                }
                _ => return Ok(fields),
            }
        }
    }

    fn merge_fields(&mut self) -> Result<MergeFields> {
        let branch = self.reference()?;
        let mut fields = MergeFields {
            branch,
            id: None,
            commit_type: None,
            tag: None,
        };
        loop {
            match self.peek() {
                Token::IdField => {
                    self.bump();
                    set_once(&mut fields.id, self.string("commit id")?, "id:", self.line())?;
                }
                Token::TagField => {
                    self.bump();
                    set_once(&mut fields.tag, self.string("tag")?, "tag:", self.line())?;
                }
                Token::TypeField => {
                    self.bump();
                    let t = self.commit_type()?;
                    set_once(&mut fields.commit_type, t, "type:", self.line())?;
                }
                _ => return Ok(fields),
            }
        }
    }

    /// `cherry-pick` requires `id:`; `tag:` additionally accepts the
    /// explicit empty string.
    fn cherry_pick_fields(&mut self) -> Result<CherryPickFields> {
        let mut source: Option<String> = None;
        let mut tag: Option<String> = None;
        let mut parent: Option<String> = None;
        loop {
            match self.peek() {
                Token::IdField => {
                    self.bump();
                    set_once(&mut source, self.string("commit id")?, "id:", self.line())?;
                }
                Token::TagField => {
                    self.bump();
                    let value = if self.eat(&Token::EmptyStr) {
                        String::new()
                    } else {
                        self.string("tag")?
                    };
                    set_once(&mut tag, value, "tag:", self.line())?;
                }
                Token::ParentField => {
                    self.bump();
                    set_once(&mut parent, self.string("parent id")?, "parent:", self.line())?;
                }
                _ => break,
            }
        }
        let Some(source) = source else {
            return Err(self.unexpected(&["'id:'"]));
        };
        Ok(CherryPickFields { source, tag, parent })
    }

    /// Branch reference: a bare identifier or a quoted name.
    fn reference(&mut self) -> Result<String> {
        match self.peek() {
            Token::Ident(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            Token::Str(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.unexpected(&["a branch name"])),
        }
    }

    fn string(&mut self, what: &str) -> Result<String> {
        match self.peek() {
            Token::Str(s) => {
                let s = s.clone();
                self.bump();
                Ok(s)
            }
            _ => {
                let wanted = format!("a quoted {what}");
                Err(self.unexpected(&[wanted.as_str()]))
            }
        }
    }

    fn number(&mut self) -> Result<i64> {
        match self.peek() {
            Token::Num(n) => {
                let n = *n;
                self.bump();
                Ok(n)
            }
            _ => Err(self.unexpected(&["a number"])),
        }
    }

    fn commit_type(&mut self) -> Result<crate::core::CommitType> {
        match self.peek() {
            Token::TypeKeyword(t) => {
                let t = *t;
                self.bump();
                Ok(t)
            }
            _ => Err(self.unexpected(&["NORMAL", "REVERSE", "HIGHLIGHT"])),
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &str, line: usize) -> Result<()> {
    if slot.is_some() {
        return Err(GitGraphError::Syntax {
            line,
            found: format!("duplicate {field} field"),
            expected: vec!["end of line".to_string()],
        });
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommitType, Direction};

    #[test]
    fn header_with_direction_and_colon() {
        let doc = parse("gitGraph LR:\ncommit\n").unwrap();
        assert_eq!(doc.direction, Some(Direction::LR));
        assert_eq!(doc.statements.len(), 1);
    }

    #[test]
    fn header_options_block_is_kept_raw() {
        let doc = parse("gitGraph\noptions\n{\"x\": 1}\nend\ncommit\n").unwrap();
        assert_eq!(doc.options.as_deref(), Some("{\"x\": 1}\n"));
    }

    #[test]
    fn commit_fields_accept_any_order() {
        let a = parse("gitGraph\ncommit id: \"c\" tag: \"t\" type: REVERSE msg: \"m\"\n").unwrap();
        let b = parse("gitGraph\ncommit msg: \"m\" type: REVERSE tag: \"t\" id: \"c\"\n").unwrap();
        assert_eq!(a.statements, b.statements);
        match &a.statements[0] {
            Statement::Commit(f) => {
                assert_eq!(f.id.as_deref(), Some("c"));
                assert_eq!(f.tag.as_deref(), Some("t"));
                assert_eq!(f.commit_type, Some(CommitType::Reverse));
                assert_eq!(f.message.as_deref(), Some("m"));
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn bare_commit_message_argument() {
        let doc = parse("gitGraph\ncommit \"did things\"\n").unwrap();
        match &doc.statements[0] {
            Statement::Commit(f) => assert_eq!(f.message.as_deref(), Some("did things")),
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let err = parse("gitGraph\ncommit id: \"a\" id: \"b\"\n").unwrap_err();
        assert!(matches!(err, GitGraphError::Syntax { .. }));
    }

    #[test]
    fn branch_with_order() {
        let doc = parse("gitGraph\nbranch hotfix order: 2\n").unwrap();
        assert_eq!(
            doc.statements[0],
            Statement::Branch {
                name: "hotfix".to_string(),
                order: Some(2),
            }
        );
    }

    #[test]
    fn merge_fields_accept_any_order() {
        let doc = parse("gitGraph\nmerge dev tag: \"v1\" id: \"m1\" type: HIGHLIGHT\n").unwrap();
        match &doc.statements[0] {
            Statement::Merge(f) => {
                assert_eq!(f.branch, "dev");
                assert_eq!(f.id.as_deref(), Some("m1"));
                assert_eq!(f.tag.as_deref(), Some("v1"));
                assert_eq!(f.commit_type, Some(CommitType::Highlight));
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn cherry_pick_requires_source_id() {
        let err = parse("gitGraph\ncherry-pick tag: \"t\"\n").unwrap_err();
        assert!(matches!(err, GitGraphError::Syntax { .. }));
    }

    #[test]
    fn cherry_pick_empty_tag_is_recorded() {
        let doc = parse("gitGraph\ncherry-pick id: \"a\" tag: \"\"\n").unwrap();
        assert_eq!(
            doc.statements[0],
            Statement::CherryPick(CherryPickFields {
                source: "a".to_string(),
                tag: Some(String::new()),
                parent: None,
            })
        );
    }

    #[test]
    fn cherry_pick_parent_and_tag_commute() {
        let a = parse("gitGraph\ncherry-pick id: \"m\" parent: \"p\" tag: \"t\"\n").unwrap();
        let b = parse("gitGraph\ncherry-pick id: \"m\" tag: \"t\" parent: \"p\"\n").unwrap();
        assert_eq!(a.statements, b.statements);
    }

    #[test]
    fn syntax_error_reports_line_and_expectations() {
        let err = parse("gitGraph\ncommit\nbogus\n").unwrap_err();
        match err {
            GitGraphError::Syntax { line, found, expected } => {
                assert_eq!(line, 3);
                assert!(found.contains("bogus"));
                assert!(expected.iter().any(|e| e.contains("commit")));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_header_is_rejected() {
        let err = parse("commit\n").unwrap_err();
        assert!(matches!(err, GitGraphError::Syntax { .. }));
    }

    #[test]
    fn direction_statement_inside_body() {
        let doc = parse("gitGraph\ncommit\nTB\ncommit\n").unwrap();
        assert_eq!(doc.statements[1], Statement::Direction(Direction::TB));
    }

    #[test]
    fn acc_and_section_statements() {
        let doc = parse(
            "gitGraph\naccTitle: title text\naccDescr: descr text\nsection phase one\ncommit\n",
        )
        .unwrap();
        assert_eq!(doc.statements[0], Statement::AccTitle("title text".to_string()));
        assert_eq!(doc.statements[1], Statement::AccDescr("descr text".to_string()));
        assert_eq!(doc.statements[2], Statement::Section("phase one".to_string()));
    }
}
