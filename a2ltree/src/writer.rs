use std::fmt::Write;

use crate::node::IntValue;

/// Collects output text as a list of indented lines
///
/// Values are separated by a single space. A new line is only started when `newline()` is called.
#[derive(Debug)]
pub(crate) struct Writer {
    indent: usize,
    line_indent: usize,
    current: String,
    lines: Vec<(usize, String)>,
}

impl Writer {
    pub(crate) fn new(indent: usize) -> Self {
        Self {
            indent,
            line_indent: indent,
            current: String::with_capacity(128),
            lines: Vec::new(),
        }
    }

    fn add_separator(&mut self) {
        if self.current.is_empty() {
            self.line_indent = self.indent;
        } else {
            self.current.push(' ');
        }
    }

    // add a string to the output, separated from any previous text on the line
    pub(crate) fn add_str(&mut self, text: &str) {
        self.add_separator();
        self.current.push_str(text);
    }

    pub(crate) fn add_quoted_string(&mut self, value: &str) {
        self.add_separator();
        self.current.push('"');

        // escaping lots of strings is an expensive operation, so check if anything needs to be done first
        if value.contains(['\'', '"', '\\', '\r', '\n', '\t']) {
            for c in value.chars() {
                match c {
                    '\'' | '"' | '\\' => {
                        self.current.push('\\');
                        self.current.push(c);
                    }
                    '\r' => {
                        // non-standard in a2l files
                        self.current.push_str("\\r");
                    }
                    '\n' => self.current.push_str("\\n"),
                    '\t' => self.current.push_str("\\t"),
                    _ => self.current.push(c),
                }
            }
        } else {
            self.current.push_str(value);
        }
        self.current.push('"');
    }

    pub(crate) fn add_integer(&mut self, intval: IntValue) {
        self.add_separator();
        let IntValue {
            value,
            is_hex,
            is_u64,
        } = intval;
        // writing to a String cannot fail
        let _ = match (is_hex, is_u64 || value >= 0) {
            (true, true) => write!(self.current, "0x{:X}", value as u64),
            (true, false) => write!(self.current, "-0x{:X}", value.unsigned_abs()),
            (false, true) => write!(self.current, "{}", value as u64),
            (false, false) => write!(self.current, "{value}"),
        };
    }

    pub(crate) fn add_float(&mut self, value: f64) {
        self.add_separator();
        let _ = if value == 0f64 {
            write!(self.current, "0")
        } else if value < -1e+10 || (-0.0001 < value && value < 0.0001) || 1e+10 < value {
            write!(self.current, "{value:e}")
        } else {
            write!(self.current, "{value}")
        };
    }

    // finish the current line; the next text starts a new line at the current indentation
    pub(crate) fn newline(&mut self) {
        if !self.current.is_empty() {
            let line = std::mem::take(&mut self.current);
            self.lines.push((self.line_indent, line));
        }
    }

    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub(crate) fn finish(mut self) -> Vec<(usize, String)> {
        self.newline();
        self.lines
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn write_str() {
        let mut writer = Writer::new(2);
        writer.add_str("test");
        writer.add_str("abc");
        assert_eq!(writer.finish(), vec![(2, "test abc".to_string())]);
    }

    #[test]
    fn write_quoted_string() {
        let mut writer = Writer::new(0);
        writer.add_quoted_string("test:\rabc\ndef\tghi\'jkl\"nmo\\pqr");
        assert_eq!(
            writer.finish()[0].1,
            r#""test:\rabc\ndef\tghi\'jkl\"nmo\\pqr""#
        );
    }

    #[test]
    fn write_integer() {
        let mut writer = Writer::new(0);
        let hex = |value| IntValue {
            value,
            is_hex: true,
            is_u64: false,
        };
        let large = IntValue {
            value: -1,
            is_hex: false,
            is_u64: true,
        };
        writer.add_integer(IntValue::new(123));
        writer.add_integer(hex(123));
        writer.add_integer(hex(-16));
        writer.add_integer(IntValue { is_hex: true, ..large });
        writer.add_integer(large);
        writer.add_integer(IntValue::new(-1));
        writer.add_integer(hex(i64::MIN));
        assert_eq!(
            writer.finish()[0].1,
            "123 0x7B -0x10 0xFFFFFFFFFFFFFFFF 18446744073709551615 -1 -0x8000000000000000"
        );
    }

    #[test]
    fn write_float() {
        let mut writer = Writer::new(0);
        writer.add_float(123.456);
        // very small value -> scientific notation
        writer.add_float(0.0000123456);
        // very large value -> scientific notation
        writer.add_float(123456000000.0);
        writer.add_float(0.0);
        writer.add_float(-4.5);
        writer.add_float(12.0);
        assert_eq!(
            writer.finish()[0].1,
            "123.456 1.23456e-5 1.23456e11 0 -4.5 12"
        );
    }

    #[test]
    fn write_lines() {
        let mut writer = Writer::new(1);
        writer.add_str("/begin BLOCK");
        writer.indent();
        writer.newline();
        writer.add_integer(IntValue::new(1));
        writer.outdent();
        writer.newline();
        // empty lines are not emitted
        writer.newline();
        writer.add_str("/end BLOCK");
        assert_eq!(
            writer.finish(),
            vec![
                (1, "/begin BLOCK".to_string()),
                (2, "1".to_string()),
                (1, "/end BLOCK".to_string())
            ]
        );
    }
}
