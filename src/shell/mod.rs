use std::io::{BufRead, Write};

use parser::{error::Error, lexer::token::Token};

/// 結果の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
enum Report<'a> {
    Value(&'a Token),
    Error {
        error: &'a Error,
        rendered: String,
    },
}

/// １行ずつ式を評価して結果かエラーを書き出す
/// 評価の失敗ではループを止めず、書き込み・読み込みの失敗のみ呼び出し元へ返す
pub struct Shell<W>
where
    W: Write,
{
    source_name: String,
    format: Format,
    out: W,
}

impl<W> Shell<W>
where
    W: Write,
{
    pub fn new(source_name: impl Into<String>, format: Format, out: W) -> Self {
        Self {
            source_name: source_name.into(),
            format,
            out,
        }
    }

    /// reader の終端まで読み、各行を評価する
    /// prompt が指定されている場合は各行の読み込み前に表示する
    pub fn run<R: BufRead>(&mut self, reader: R, prompt: Option<&str>) -> std::io::Result<()> {
        let mut lines = reader.lines();
        let mut number = 0;

        loop {
            if let Some(prompt) = prompt {
                write!(self.out, "{}", prompt)?;
                self.out.flush()?;
            }

            match lines.next() {
                Some(line) => {
                    self.eval(&line?, number)?;
                }
                None => break,
            }

            number += 1;
        }

        Ok(())
    }

    /// １行を評価して結果を書き出し、評価に成功したかを返す
    /// 空白のみの行は評価せずに読み飛ばす
    pub fn eval_line(&mut self, line: &str) -> std::io::Result<bool> {
        self.eval(line, 0)
    }

    /// number はエラー表示に使う行番号（0 始まり）
    fn eval(&mut self, line: &str, number: usize) -> std::io::Result<bool> {
        if line.trim().is_empty() {
            return Ok(true);
        }

        let result = parser::run_at_line(&self.source_name, line, number);
        self.report(&result)?;

        Ok(result.is_ok())
    }

    fn report(&mut self, result: &Result<Token, Error>) -> std::io::Result<()> {
        match self.format {
            Format::Text => match result {
                Ok(token) => writeln!(self.out, "{}", token),
                Err(e) => writeln!(self.out, "{}", e),
            },
            Format::Json => {
                let report = match result {
                    Ok(token) => Report::Value(token),
                    Err(e) => Report::Error {
                        error: e,
                        rendered: e.to_string(),
                    },
                };
                let json = serde_json::to_string(&report).map_err(std::io::Error::other)?;
                writeln!(self.out, "{}", json)
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(input: &str, format: Format, prompt: Option<&str>) -> String {
        let mut shell = Shell::new("<stdin>", format, Vec::new());
        shell
            .run(std::io::Cursor::new(input), prompt)
            .expect("Vec への書き込みは失敗しない");

        String::from_utf8(shell.into_inner()).expect("invalid UTF-8")
    }

    #[rstest::rstest]
    #[case("2+3*4\n", "INT:14\n")]
    #[case("6/3\n", "FLOAT:2.0\n")]
    #[case("\n   \n\t\n", "")]
    #[
        case(
            "5 $ 2\n10-2-3\n",
            "Illegal Character: '$' in <stdin>, line 1\nINT:5\n"
        )
    ]
    #[
        case(
            "1 + 1\n\n(2 *\n",
            "INT:2\nUnexpected End Of Input: Expected a number in <stdin>, line 3\n"
        )
    ]
    #[case("1 / 0", "Division By Zero: Division by zero in <stdin>, line 1\n")]
    fn test_text_session(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(session(input, Format::Text, None), expected);
    }

    #[test]
    fn test_prompt() {
        assert_eq!(
            session("1+1\n\n", Format::Text, Some("basic > ")),
            "basic > INT:2\nbasic > basic > "
        );
    }

    #[test]
    fn test_json_session() {
        let output = session("7/2\n1 + 2\n5 $ 2\n", Format::Json, None);
        let lines = output
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            lines,
            vec![
                serde_json::json!({ "kind": "FLOAT", "value": 3.5 }),
                serde_json::json!({ "kind": "INT", "value": 3 }),
                serde_json::json!({
                    "error": {
                        "kind": "IllegalCharacter",
                        "span": {
                            "start": { "index": 2, "line": 2, "column": 2 },
                            "end": { "index": 3, "line": 2, "column": 3 },
                        },
                        "message": "'$'",
                    },
                    "rendered": "Illegal Character: '$' in <stdin>, line 3",
                }),
            ]
        );
    }

    #[test]
    fn test_eval_line() {
        let mut shell = Shell::new("calc", Format::Text, Vec::new());

        assert!(shell.eval_line("(1 + 2) * 3").unwrap());
        assert!(!shell.eval_line("(1 + 2").unwrap());
        assert!(shell.eval_line("  ").unwrap());

        let output = String::from_utf8(shell.into_inner()).unwrap();
        assert_eq!(
            output,
            "INT:9\nUnmatched Parenthesis: '(' is never closed in calc, line 1\n"
        );
    }
}
