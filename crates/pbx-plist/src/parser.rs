//! Recursive-descent parser from the token stream to a [`Document`].
//!
//! The grammar is small enough that one token of lookahead suffices; there
//! is no backtracking. Recursion depth is bounded only by input nesting.

use pbx_core::{Dict, Document, ObjectId, Value};

use crate::error::{CodecError, Pos, Result};
use crate::lexer::{tokenize, Token};

/// Parse descriptor text into a [`Document`].
pub(crate) fn parse_document(src: &str) -> Result<Document> {
    let mut parser = Parser::new(tokenize(src)?);
    match parser.next() {
        None => return Err(CodecError::UnexpectedEof { expected: "'{'" }),
        Some((Token::LBrace, _)) => {}
        Some((token, pos)) => {
            return Err(CodecError::Unexpected {
                pos,
                expected: "'{'",
                found: token.describe(),
            })
        }
    }
    let top = parser.dict_body()?;
    if let Some((token, pos)) = parser.next() {
        return Err(CodecError::Unexpected {
            pos,
            expected: "end of input",
            found: token.describe(),
        });
    }
    document_from_dict(top)
}

struct Parser {
    tokens: Vec<(Token, Pos)>,
    index: usize,
}

impl Parser {
    fn new(tokens: Vec<(Token, Pos)>) -> Self {
        Parser { tokens, index: 0 }
    }

    fn next(&mut self) -> Option<(Token, Pos)> {
        let item = self.tokens.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        item
    }

    fn peek(&self) -> Option<&(Token, Pos)> {
        self.tokens.get(self.index)
    }

    fn value(&mut self) -> Result<Value> {
        match self.next() {
            None => Err(CodecError::UnexpectedEof {
                expected: "a value",
            }),
            Some((Token::LBrace, _)) => Ok(Value::Dict(self.dict_body()?)),
            Some((Token::LParen, _)) => self.array_body(),
            Some((Token::Word(word), _)) => Ok(classify(word)),
            Some((Token::Quoted(text), _)) => Ok(Value::String(text)),
            Some((token, pos)) => Err(CodecError::Unexpected {
                pos,
                expected: "a value",
                found: token.describe(),
            }),
        }
    }

    /// Parse `key = value;` entries up to and including the closing brace.
    /// The opening brace has already been consumed.
    fn dict_body(&mut self) -> Result<Dict> {
        let mut dict = Dict::new();
        loop {
            match self.next() {
                None => {
                    return Err(CodecError::UnexpectedEof {
                        expected: "a key or '}'",
                    })
                }
                Some((Token::RBrace, _)) => return Ok(dict),
                Some((Token::Word(key), pos)) | Some((Token::Quoted(key), pos)) => {
                    if dict.contains_key(&key) {
                        return Err(CodecError::DuplicateKey { pos, key });
                    }
                    self.expect(&Token::Equals, "'='")?;
                    let value = self.value()?;
                    self.expect(&Token::Semi, "';'")?;
                    dict.insert(key, value);
                }
                Some((token, pos)) => {
                    return Err(CodecError::Unexpected {
                        pos,
                        expected: "a key or '}'",
                        found: token.describe(),
                    })
                }
            }
        }
    }

    /// Parse `value,` elements up to and including the closing paren. The
    /// trailing comma is optional on the final element. The opening paren
    /// has already been consumed.
    fn array_body(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            if let Some((Token::RParen, _)) = self.peek() {
                self.next();
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            match self.next() {
                None => {
                    return Err(CodecError::UnexpectedEof {
                        expected: "',' or ')'",
                    })
                }
                Some((Token::Comma, _)) => {}
                Some((Token::RParen, _)) => return Ok(Value::Array(items)),
                Some((token, pos)) => {
                    return Err(CodecError::Unexpected {
                        pos,
                        expected: "',' or ')'",
                        found: token.describe(),
                    })
                }
            }
        }
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> Result<()> {
        match self.next() {
            None => Err(CodecError::UnexpectedEof { expected }),
            Some((found, _)) if found == *token => Ok(()),
            Some((found, pos)) => Err(CodecError::Unexpected {
                pos,
                expected,
                found: found.describe(),
            }),
        }
    }
}

/// Classify a bare word. Integer first: 24-digit runs overflow `i64`, so
/// integer and reference classification never collide and every value the
/// encoder emits bare maps back to its original variant.
fn classify(word: String) -> Value {
    if let Ok(n) = word.parse::<i64>() {
        Value::Integer(n)
    } else if ObjectId::matches(&word) {
        match ObjectId::parse(&word) {
            Ok(id) => Value::Reference(id),
            Err(_) => Value::String(word),
        }
    } else {
        Value::String(word)
    }
}

/// Lift the parsed top-level mapping into a [`Document`], enforcing the
/// five required keys and their types.
fn document_from_dict(top: Dict) -> Result<Document> {
    let mut archive_version = None;
    let mut classes = None;
    let mut object_version = None;
    let mut objects = None;
    let mut root_object = None;

    for (key, value) in top {
        match key.as_str() {
            "archiveVersion" => archive_version = Some(integer("archiveVersion", value)?),
            "classes" => classes = Some(dict("classes", value)?),
            "objectVersion" => object_version = Some(integer("objectVersion", value)?),
            "objects" => objects = Some(dict("objects", value)?),
            "rootObject" => root_object = Some(reference("rootObject", value)?),
            _ => return Err(CodecError::UnexpectedDocumentKey { key }),
        }
    }

    let archive_version = archive_version.ok_or(CodecError::MissingDocumentKey {
        key: "archiveVersion",
    })?;
    let classes = classes.ok_or(CodecError::MissingDocumentKey { key: "classes" })?;
    let object_version = object_version.ok_or(CodecError::MissingDocumentKey {
        key: "objectVersion",
    })?;
    let objects = objects.ok_or(CodecError::MissingDocumentKey { key: "objects" })?;
    let root_object = root_object.ok_or(CodecError::MissingDocumentKey { key: "rootObject" })?;

    let mut document = Document::new(object_version, root_object);
    document.archive_version = archive_version;
    document.classes = classes;
    for (key, value) in objects {
        let id = ObjectId::parse(&key).map_err(|_| CodecError::InvalidObjectKey { key })?;
        match value {
            Value::Dict(body) => {
                document.insert_object(id, body);
            }
            _ => return Err(CodecError::ObjectBodyType { id }),
        }
    }
    Ok(document)
}

fn integer(key: &'static str, value: Value) -> Result<i64> {
    match value {
        Value::Integer(n) => Ok(n),
        _ => Err(CodecError::DocumentKeyType {
            key,
            expected: "an integer",
        }),
    }
}

fn dict(key: &'static str, value: Value) -> Result<Dict> {
    match value {
        Value::Dict(d) => Ok(d),
        _ => Err(CodecError::DocumentKeyType {
            key,
            expected: "a mapping",
        }),
    }
}

fn reference(key: &'static str, value: Value) -> Result<ObjectId> {
    match value {
        Value::Reference(id) => Ok(id),
        _ => Err(CodecError::DocumentKeyType {
            key,
            expected: "an object reference",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "0123456789ABCDEF01234567";

    fn minimal_src() -> String {
        format!(
            "{{ archiveVersion = 1; classes = {{ }}; objectVersion = 56; \
             objects = {{ {ROOT} = {{ isa = PBXProject; }}; }}; rootObject = {ROOT}; }}"
        )
    }

    #[test]
    fn parses_a_minimal_document() {
        let doc = parse_document(&minimal_src()).unwrap();
        assert_eq!(doc.archive_version, 1);
        assert_eq!(doc.object_version, 56);
        assert_eq!(doc.object_count(), 1);
        assert_eq!(doc.root_object.as_str(), ROOT);
        let body = doc.object(&doc.root_object).unwrap();
        assert_eq!(body.get("isa").and_then(Value::as_str), Some("PBXProject"));
    }

    #[test]
    fn bare_words_classify_by_shape() {
        assert_eq!(classify("42".into()), Value::Integer(42));
        assert_eq!(classify("-7".into()), Value::Integer(-7));
        assert_eq!(
            classify(ROOT.into()),
            Value::Reference(ObjectId::parse(ROOT).unwrap())
        );
        assert_eq!(classify("hello".into()), Value::String("hello".into()));
        // 24 digits overflow i64 and classify as a reference, not an integer
        assert_eq!(
            classify("111111111111111111111111".into()),
            Value::Reference(ObjectId::parse("111111111111111111111111").unwrap())
        );
        // lowercase hex is an ordinary string
        assert_eq!(
            classify("0123456789abcdef01234567".into()),
            Value::String("0123456789abcdef01234567".into())
        );
    }

    #[test]
    fn missing_closing_brace_fails_without_partial_output() {
        let err = parse_document("{ archiveVersion = 1; ").unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof { .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn key_without_equals_fails() {
        let err = parse_document("{ archiveVersion 1; }").unwrap_err();
        match err {
            CodecError::Unexpected { expected, .. } => assert_eq!(expected, "'='"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_semicolon_fails() {
        let err = parse_document("{ archiveVersion = 1 }").unwrap_err();
        match err {
            CodecError::Unexpected { expected, .. } => assert_eq!(expected, "';'"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_array_separator_fails() {
        let src = minimal_src().replace(
            "isa = PBXProject;",
            "isa = PBXProject; knownRegions = (en Base);",
        );
        let err = parse_document(&src).unwrap_err();
        match err {
            CodecError::Unexpected { expected, .. } => assert_eq!(expected, "',' or ')'"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn trailing_garbage_fails() {
        let src = format!("{} extra", minimal_src());
        let err = parse_document(&src).unwrap_err();
        match err {
            CodecError::Unexpected { expected, .. } => assert_eq!(expected, "end of input"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_keys_fail() {
        let err = parse_document("{ a = 1; a = 2; }").unwrap_err();
        match err {
            CodecError::DuplicateKey { key, .. } => assert_eq!(key, "a"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_required_document_key_fails() {
        let err = parse_document("{ archiveVersion = 1; }").unwrap_err();
        assert!(matches!(err, CodecError::MissingDocumentKey { .. }));
    }

    #[test]
    fn unknown_document_key_fails() {
        let src = minimal_src().replace("archiveVersion", "archiveVersionTypo");
        let err = parse_document(&src).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedDocumentKey { .. }));
    }

    #[test]
    fn wrong_document_key_type_fails() {
        let src = minimal_src().replace("archiveVersion = 1", "archiveVersion = one");
        let err = parse_document(&src).unwrap_err();
        assert!(matches!(
            err,
            CodecError::DocumentKeyType {
                key: "archiveVersion",
                ..
            }
        ));
    }

    #[test]
    fn non_identifier_object_key_fails() {
        let src = minimal_src().replace(&format!("{ROOT} = {{ isa"), "shortkey = { isa");
        let err = parse_document(&src).unwrap_err();
        assert!(matches!(err, CodecError::InvalidObjectKey { .. }));
    }

    #[test]
    fn scalar_object_body_fails() {
        let src = minimal_src().replace("= { isa = PBXProject; };", "= 5;");
        let err = parse_document(&src).unwrap_err();
        assert!(matches!(err, CodecError::ObjectBodyType { .. }));
    }

    #[test]
    fn array_allows_missing_trailing_comma() {
        let src = minimal_src().replace(
            "isa = PBXProject;",
            "isa = PBXProject; knownRegions = (en, Base);",
        );
        let doc = parse_document(&src).unwrap();
        let body = doc.object(&doc.root_object).unwrap();
        let regions = body.get("knownRegions").and_then(Value::as_array).unwrap();
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn empty_input_fails() {
        let err = parse_document("").unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof { expected: "'{'" }));
    }
}
