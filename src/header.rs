//! Header-only scan of a Go source file.
//!
//! Reads just far enough to find the package clause, collecting every
//! comment before it (and any trailing the clause, up to the next token)
//! into comment groups. The rest of the file is never looked at.

use crate::errors::HeaderError;
use crate::parser::Parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub package: &'a str,
    pub comments: Vec<CommentGroup<'a>>,
}

/// Adjacent comments with no blank line between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup<'a> {
    /// Raw comments, markers included.
    pub list: Vec<&'a str>,
    end_line: usize,
}

impl CommentGroup<'_> {
    /// Comment text with markers removed.
    ///
    /// `//` loses one following space, trailing whitespace is stripped from
    /// every line, leading and trailing blank lines are dropped and interior
    /// runs of blank lines collapse to one. Tool directives such as
    /// `//go:build` are not part of the text.
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        for c in &self.list {
            if let Some(body) = c.strip_prefix("//") {
                if is_directive(body) {
                    continue;
                }
                lines.push(body.strip_prefix(' ').unwrap_or(body));
            } else if let Some(body) = c.strip_prefix("/*").and_then(|b| b.strip_suffix("*/")) {
                lines.extend(body.split('\n'));
            }
        }

        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        for line in lines.into_iter().map(str::trim_end) {
            let prev_blank = out.last().map_or(true, |l| l.is_empty());
            if line.is_empty() && prev_blank {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }
        out.join("\n")
    }
}

/// `//line `, `//extern `, `//export ` and `//word:word` comments.
fn is_directive(body: &str) -> bool {
    if ["line ", "extern ", "export "].iter().any(|p| body.starts_with(p)) {
        return true;
    }
    let bytes = body.as_bytes();
    let colon = match body.find(':') {
        Some(i) if i > 0 && i + 1 < bytes.len() => i,
        _ => return false,
    };
    (0..=colon + 1)
        .filter(|&i| i != colon)
        .all(|i| bytes[i].is_ascii_lowercase() || bytes[i].is_ascii_digit())
}

#[derive(Default)]
struct Groups<'a> {
    groups: Vec<CommentGroup<'a>>,
}

impl<'a> Groups<'a> {
    fn push(&mut self, raw: &'a str, start_line: usize, end_line: usize) {
        match self.groups.last_mut() {
            Some(g) if start_line <= g.end_line + 1 => {
                g.list.push(raw);
                g.end_line = end_line;
            }
            _ => self.groups.push(CommentGroup {
                list: vec![raw],
                end_line,
            }),
        }
    }
}

/// Reads one comment at the cursor, if there is one. Returns the raw text.
fn read_comment<'a>(p: &mut Parser<'a>) -> Result<Option<&'a str>, HeaderError> {
    let start = p.pos();
    if p.consume_str("//") {
        p.capture_line();
    } else if p.consume_str("/*") {
        p.capture_until("*/")
            .ok_or(HeaderError::UnterminatedComment { offset: start })?;
    } else {
        return Ok(None);
    }
    Ok(Some(p.slice(start, p.pos())))
}

fn scan_comments<'a>(p: &mut Parser<'a>, groups: &mut Groups<'a>) -> Result<(), HeaderError> {
    loop {
        p.skip_ws();
        let start_line = p.line();
        match read_comment(p)? {
            Some(raw) => groups.push(raw, start_line, p.line()),
            None => return Ok(()),
        }
    }
}

/// Consumes the end of the package clause: a newline, `;`, end of input, or
/// a block comment that spans lines. Comments on the way are kept.
fn finish_clause<'a>(p: &mut Parser<'a>, groups: &mut Groups<'a>) -> Result<(), HeaderError> {
    loop {
        p.skip_inline_ws();
        if p.eof() || p.consume_char('\n') || p.consume_char(';') {
            return Ok(());
        }
        let start_line = p.line();
        match read_comment(p)? {
            Some(raw) => {
                groups.push(raw, start_line, p.line());
                if raw.starts_with("/*") && raw.contains('\n') {
                    return Ok(());
                }
            }
            None => return Err(HeaderError::ExpectedSemicolon { offset: p.pos() }),
        }
    }
}

pub fn parse_header(src: &str) -> Result<Header<'_>, HeaderError> {
    let mut p = Parser::new(src);
    let mut groups = Groups::default();
    p.consume_char('\u{feff}');

    scan_comments(&mut p, &mut groups)?;
    let offset = p.pos();
    if p.parse_identifier() != Some("package") {
        return Err(HeaderError::MissingPackageClause { offset });
    }

    scan_comments(&mut p, &mut groups)?;
    let offset = p.pos();
    let package = match p.parse_identifier() {
        Some("_") => return Err(HeaderError::BlankPackageName),
        Some(name) => name,
        None => return Err(HeaderError::MissingPackageName { offset }),
    };

    finish_clause(&mut p, &mut groups)?;
    scan_comments(&mut p, &mut groups)?;

    Ok(Header {
        package,
        comments: groups.groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(src: &str) -> Vec<String> {
        parse_header(src)
            .unwrap()
            .comments
            .iter()
            .map(CommentGroup::text)
            .collect()
    }

    #[test]
    fn package_only() {
        let h = parse_header("package main\n\nfunc main() {}\n").unwrap();
        assert_eq!(h.package, "main");
        assert!(h.comments.is_empty());
    }

    #[test]
    fn groups_split_on_blank_lines() {
        let src = "// +build linux\n// +build amd64\n\n// Package x does things.\npackage x\n";
        assert_eq!(
            texts(src),
            vec!["+build linux\n+build amd64", "Package x does things."]
        );
    }

    #[test]
    fn block_comments() {
        let src = "/*\n+build darwin\n\n\n  indented   \n*/\npackage y";
        assert_eq!(texts(src), vec!["+build darwin\n\n  indented"]);
    }

    #[test]
    fn directives_are_dropped() {
        let src = "//go:build linux\n// +build linux\n//export Foo\npackage z\n";
        assert_eq!(texts(src), vec!["+build linux"]);
    }

    #[test]
    fn comments_after_the_clause() {
        let src = "package w // trailing\n\n// +build ignore\nimport \"fmt\"\n// not read\n";
        assert_eq!(texts(src), vec!["trailing", "+build ignore"]);
    }

    #[test]
    fn bom_and_semicolon() {
        let h = parse_header("\u{feff}package v; import \"os\"").unwrap();
        assert_eq!(h.package, "v");
    }

    #[test]
    fn header_errors() {
        assert_eq!(
            parse_header("/* open"),
            Err(HeaderError::UnterminatedComment { offset: 0 })
        );
        assert_eq!(
            parse_header("// c\nfunc main() {}"),
            Err(HeaderError::MissingPackageClause { offset: 5 })
        );
        assert_eq!(
            parse_header("packagemain"),
            Err(HeaderError::MissingPackageClause { offset: 0 })
        );
        assert_eq!(
            parse_header("package 1x"),
            Err(HeaderError::MissingPackageName { offset: 8 })
        );
        assert_eq!(parse_header("package _\n"), Err(HeaderError::BlankPackageName));
        assert_eq!(
            parse_header("\u{a0}package a"),
            Err(HeaderError::MissingPackageClause { offset: 0 })
        );
        assert_eq!(
            parse_header("package a b"),
            Err(HeaderError::ExpectedSemicolon { offset: 10 })
        );
        assert_eq!(
            parse_header(""),
            Err(HeaderError::MissingPackageClause { offset: 0 })
        );
    }

    #[test]
    fn long_licence_header_is_one_group() {
        let mut src = "// licence text line\n".repeat(50_000);
        src.push_str("// +build linux\n\n// Package a.\npackage a\n");
        let h = parse_header(&src).unwrap();
        assert_eq!(h.comments.len(), 2);
        assert_eq!(h.comments[0].list.len(), 50_001);
        assert_eq!(h.comments[0].end_line, 50_001);
    }

    #[test]
    fn directive_detection() {
        assert!(is_directive("go:generate stringer"));
        assert!(is_directive("line foo.go:10"));
        assert!(!is_directive(" +build linux"));
        assert!(!is_directive("Go:build"));
        assert!(!is_directive("x:"));
    }
}
