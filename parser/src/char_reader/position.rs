use std::sync::Arc;

/// 入力テキスト上のカーソル位置
/// index, line, column はいずれも 0 始まりで、index は文字数で数える
/// source_name と full_text は共有されるため clone しても index, line, column は独立する
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Position {
    index: usize,
    line: usize,
    column: usize,
    #[serde(skip)]
    source_name: Arc<str>,
    #[serde(skip)]
    full_text: Arc<str>,
}

impl Position {
    pub fn new(source_name: &str, full_text: &str) -> Self {
        Self {
            index: 0,
            line: 0,
            column: 0,
            source_name: Arc::from(source_name),
            full_text: Arc::from(full_text),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// 引数の文字を読み終えた位置へ進める
    /// 改行を読んだ場合は次の行の先頭へ移る
    pub fn advance(&mut self, current_char: Option<char>) -> &mut Self {
        self.index += 1;
        self.column += 1;

        if current_char == Some('\n') {
            self.line += 1;
            self.column = 0;
        }

        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }
}

/// start から end の直前までのソース上の範囲
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// 自身の先頭から other の末尾までを覆う範囲を返す
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start.clone(), other.end.clone())
    }

    /// 範囲に含まれるソース上の文字列
    pub fn text(&self) -> String {
        self.start
            .full_text()
            .chars()
            .skip(self.start.index)
            .take(self.end.index.saturating_sub(self.start.index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_advance() {
        let source = "a\nb";
        let mut position = Position::new("<test>", source);

        for c in source.chars() {
            position.advance(Some(c));
        }

        assert_eq!(position.index(), 3);
        assert_eq!(position.line(), 1);
        assert_eq!(position.column(), 1);
    }

    #[test]
    fn test_advance_chain() {
        let mut position = Position::new("<test>", "\n\nx");
        position.advance(Some('\n')).advance(Some('\n'));

        assert_eq!(position.index(), 2);
        assert_eq!(position.line(), 2);
        assert_eq!(position.column(), 0);

        position.advance(None);
        assert_eq!(position.index(), 3);
        assert_eq!(position.line(), 2);
        assert_eq!(position.column(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut position = Position::new("<test>", "12");
        let snapshot = position.clone();
        position.advance(Some('1'));

        assert_eq!(snapshot.index(), 0);
        assert_eq!(snapshot.column(), 0);
        assert_eq!(position.index(), 1);
        assert_eq!(snapshot.source_name(), "<test>");
        assert_eq!(position.full_text(), "12");
    }

    #[test]
    fn test_span_text() {
        let mut start = Position::new("<test>", "1 + 23");
        start.advance(Some('1')).advance(Some(' ')).advance(Some('+'));
        let mut end = start.clone();
        end.advance(Some(' ')).advance(Some('2')).advance(Some('3'));

        let span = Span::new(start.clone(), end.clone());
        assert_eq!(span.text(), " 23");

        let origin = Position::new("<test>", "1 + 23");
        let whole = Span::new(origin.clone(), origin).to(&span);
        assert_eq!(whole.text(), "1 + 23");
    }
}
