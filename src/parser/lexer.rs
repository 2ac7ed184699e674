use itertools::Itertools;

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Symbol(String)
}

const ASCII_ARROW: &str = "->";
const ARROW: char = '→';
const OR: char = '|';

// Length of the arrow at the start of `text`, if there is one
fn arrow_len(text: &str) -> Option<usize> {
    if text.starts_with(ASCII_ARROW) {
        Some(ASCII_ARROW.len())
    } else if text.starts_with(ARROW) {
        Some(ARROW.len_utf8())
    } else {
        None
    }
}

// A symbol runs until whitespace, `|` or an arrow. Returns the symbol and
// the rest of the line.
pub fn lex_symbol(text: &str) -> (Token, &str) {
    let end = text
        .char_indices()
        .find(|&(i, c)| c.is_whitespace() || c == OR || arrow_len(&text[i..]).is_some())
        .map_or(text.len(), |(i, _)| i);

    (Token::Symbol(text[..end].to_string()), &text[end..])
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if let Some(len) = arrow_len(rest) {
            tokens.push(Token::Arrow);
            rest = &rest[len..];
        } else if c == OR {
            tokens.push(Token::Or);
            rest = &rest[c.len_utf8()..];
        } else if c.is_whitespace() {
            rest = rest.trim_start();
        } else {
            let (token, remaining) = lex_symbol(rest);
            tokens.push(token);
            rest = remaining;
        }
    }

    tokens
}

// Splits a lexed line around its arrows. A well formed rule has exactly two
// sides.
pub fn split_sides(tokens: &[Token]) -> Vec<&[Token]> {
    tokens.split(|t| *t == Token::Arrow).collect_vec()
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn sym(text: &str) -> Token {
        Token::Symbol(text.to_string())
    }

    #[test]
    fn lex_normal_symbol() {
        let lines = vec![
            "alpha bravo",
            "E'|T",
            "a->b",
            "id→x",
            "delta"
        ];
        // (result from the function, rest of the line)
        let answers = vec![
            (sym("alpha"), " bravo"),
            (sym("E'"), "|T"),
            (sym("a"), "->b"),
            (sym("id"), "→x"),
            (sym("delta"), "")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            assert_eq!(lex_symbol(line), (answer_token, answer_rest));
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "E' -> + T E' | ε",
            "S→a|b",
            "  A   ->\tB   c  "
        ];
        let answers = vec![
            vec![sym("E'"), Token::Arrow, sym("+"), sym("T"), sym("E'"), Token::Or, sym("ε")],
            vec![sym("S"), Token::Arrow, sym("a"), Token::Or, sym("b")],
            vec![sym("A"), Token::Arrow, sym("B"), sym("c")]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line), answer)
        }
    }

    #[test]
    fn lex_hyphenated_symbol() {
        // A lone `-` or `>` is an ordinary symbol
        assert_eq!(lex_line("a-b - >"), vec![sym("a-b"), sym("-"), sym(">")]);
    }

    #[test]
    fn split_on_arrows() {
        assert_eq!(split_sides(&lex_line("A -> b")).len(), 2);
        assert_eq!(split_sides(&lex_line("A => b")).len(), 1);
        assert_eq!(split_sides(&lex_line("A -> b → c")).len(), 3);
        assert_eq!(split_sides(&lex_line("A ->")), vec![&[sym("A")][..], &[][..]]);
    }
}
