/// 入力テキスト上の位置を表現する
pub mod position;

use crate::char_reader::position::Position;

/// 入力テキストから１文字ずつ読み出し、読んだ分だけ Position を進める Reader
///
/// # Examples
///
/// ```
/// use parser::char_reader::CharReader;
///
/// let mut reader = CharReader::new("<doc>", "1\n2");
///
/// assert_eq!(reader.peek(), Some('1'));
/// assert_eq!(reader.read(), Some('1'));
/// assert_eq!(reader.read(), Some('\n'));
/// assert_eq!(reader.position().line(), 1);
/// assert_eq!(reader.position().column(), 0);
/// ```
#[derive(std::fmt::Debug)]
pub struct CharReader<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: Position,
}

impl<'a> CharReader<'a> {
    pub fn new(source_name: &str, text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            position: Position::new(source_name, text),
        }
    }

    /// 入力の先頭を line 行目（0 始まり）として数える
    pub fn at_line(mut self, line: usize) -> Self {
        self.position = self.position.at_line(line);
        self
    }

    /// 1文字先読みする（位置は進めない）
    /// 終端では None を返す
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// 1文字読み出して位置を進める
    /// 終端では None を返し、位置は進めない
    pub fn read(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position.advance(Some(c));

        Some(c)
    }

    /// 次に読み出す文字の位置
    pub fn position(&self) -> &Position {
        &self.position
    }
}
