use super::*;
use pretty_assertions::assert_eq;

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_owned())
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().kinds()
}

#[test]
fn semicolons_after_statement_enders() {
    let source = "package main\ntype T struct {\n\tA int\n}\n";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Package,
            ident("main"),
            TokenKind::Semicolon,
            TokenKind::Type,
            ident("T"),
            TokenKind::Struct,
            TokenKind::LBrace,
            ident("A"),
            ident("int"),
            TokenKind::Semicolon,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn semicolon_at_end_of_file() {
    assert_eq!(kinds("x"), vec![ident("x"), TokenKind::Semicolon, TokenKind::Eof]);
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn no_semicolon_after_operators() {
    assert_eq!(
        kinds("a +\nb"),
        vec![
            ident("a"),
            TokenKind::Plus,
            ident("b"),
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
}

#[test]
fn multiline_block_comment_ends_statement() {
    assert_eq!(
        kinds("a /* x\ny */ b"),
        vec![
            ident("a"),
            TokenKind::Semicolon,
            ident("b"),
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("a /* x */ b"),
        vec![ident("a"), ident("b"), TokenKind::Semicolon, TokenKind::Eof]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("func funcs _x été"),
        vec![
            TokenKind::Func,
            ident("funcs"),
            ident("_x"),
            ident("été"),
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
}

#[test]
fn literals_keep_source_text() {
    let source = r#""a\"b" `raw
text` 'x' 1.5 0x1F 1e+5 42"#;
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::String(r#""a\"b""#.to_owned()),
            TokenKind::RawString("`raw\ntext`".to_owned()),
            TokenKind::Char("'x'".to_owned()),
            TokenKind::Float("1.5".to_owned()),
            TokenKind::Int("0x1F".to_owned()),
            TokenKind::Float("1e+5".to_owned()),
            TokenKind::Int("42".to_owned()),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn operators_take_longest_match() {
    assert_eq!(
        kinds("... <- := &^= <<"),
        vec![
            TokenKind::Ellipsis,
            TokenKind::Arrow,
            TokenKind::Define,
            TokenKind::AndNotAssign,
            TokenKind::Shl,
            TokenKind::Eof
        ]
    );
}

#[test]
fn line_numbers() {
    let tokens = lex("a\n\nb\n").unwrap();
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 1); // inserted semicolon
    assert_eq!(tokens[2].line, 3);
}

#[test]
fn doc_comment_group_is_leading() {
    let source = "// Doc for T.\n// More.\ntype T int // trailing\n";
    let tokens = lex(source).unwrap();
    let leading: Vec<&str> = tokens.leading(0).iter().map(|c| c.text.as_str()).collect();
    assert_eq!(leading, vec!["// Doc for T.", "// More."]);
    assert_eq!(tokens[2].kind, ident("int"));
    assert_eq!(
        tokens.trailing(2).map(|c| c.text.as_str()),
        Some("// trailing")
    );
    assert!(tokens.leading(1).is_empty());
}

#[test]
fn detached_comment_is_not_leading() {
    let tokens = lex("// detached\n\ntype T int").unwrap();
    assert!(tokens.leading(0).is_empty());
    assert_eq!(tokens.comments().len(), 1);
}

#[test]
fn trailing_comment_does_not_document_next_line() {
    let tokens = lex("a int // one\nb int\n").unwrap();
    let b = tokens
        .tokens()
        .iter()
        .position(|t| t.kind == ident("b"))
        .unwrap();
    assert!(tokens.leading(b).is_empty());
    assert!(tokens.trailing(1).is_some());
}

#[test]
fn block_comment_lines() {
    let tokens = lex("/* one\ntwo */\nx").unwrap();
    let comment = &tokens.comments()[0];
    assert_eq!((comment.line, comment.end_line), (1, 2));
    assert_eq!(tokens.leading(0).len(), 1);
}

#[test]
fn invalid_character_reports_line() {
    let err = lex("x\n  @").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidToken);
    assert_eq!(err.line, 2);
}

#[test]
fn spelling_round_trips_operators() {
    let source = "map [ ] * <- ... &^";
    let spelled: Vec<String> = kinds(source)
        .iter()
        .map(|k| k.as_str().to_owned())
        .collect();
    assert_eq!(spelled, vec!["map", "[", "]", "*", "<-", "...", "&^", ""]);
}
