use crate::A2lError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Text encodings of a2l files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Utf32Be,
    Utf32Le,
    Utf16Be,
    Utf16Le,
    Utf8,
    Latin1,
}

// load()
// read a file and convert its content to a String. A byte order mark is removed
pub(crate) fn load(path: &Path) -> Result<String, A2lError> {
    let mut file = File::open(path).map_err(|ioerror| A2lError::FileOpenError {
        filename: path.to_path_buf(),
        ioerror,
    })?;
    let mut filedata = Vec::new();
    file.read_to_end(&mut filedata)
        .map_err(|ioerror| A2lError::FileReadError {
            filename: path.to_path_buf(),
            ioerror,
        })?;

    let (text, _) = decode_text(&filedata);
    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    if text.trim().is_empty() {
        return Err(A2lError::EmptyFileError {
            filename: path.to_path_buf(),
        });
    }

    Ok(text)
}

// decode_text()
// decode with the detected encoding. If the guess turns out to be wrong, the data is read as UTF-8, and finally as Latin-1
fn decode_text(data: &[u8]) -> (String, Encoding) {
    let detected = detect_encoding(data);
    if let Some(text) = decode(data, detected) {
        return (text, detected);
    }
    match String::from_utf8(data.to_vec()) {
        Ok(text) => (text, Encoding::Utf8),
        Err(_) => (latin1(data), Encoding::Latin1),
    }
}

// detect_encoding()
// The first character of an a2l file is either a BOM or plain ASCII. In UTF-16 and UTF-32 the
// position of the nul bytes in the first code unit gives away the width and the byte order
fn detect_encoding(data: &[u8]) -> Encoding {
    match data {
        [0, 0, 0xfe, 0xff, ..] => Encoding::Utf32Be,
        [0xff, 0xfe, 0, 0, ..] => Encoding::Utf32Le,
        [0, 0, _, c, ..] if *c != 0 => Encoding::Utf32Be,
        [c, _, 0, 0, ..] if *c != 0 => Encoding::Utf32Le,
        [0xfe, 0xff, ..] => Encoding::Utf16Be,
        [0xff, 0xfe, ..] => Encoding::Utf16Le,
        [0, c, ..] if *c != 0 => Encoding::Utf16Be,
        [c, 0, ..] if *c != 0 => Encoding::Utf16Le,
        _ if std::str::from_utf8(data).is_ok() => Encoding::Utf8,
        _ => Encoding::Latin1,
    }
}

fn decode(data: &[u8], encoding: Encoding) -> Option<String> {
    match encoding {
        Encoding::Utf32Be => decode_utf32(data, u32::from_be_bytes),
        Encoding::Utf32Le => decode_utf32(data, u32::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(data, u16::from_be_bytes),
        Encoding::Utf16Le => decode_utf16(data, u16::from_le_bytes),
        Encoding::Utf8 => String::from_utf8(data.to_vec()).ok(),
        Encoding::Latin1 => Some(latin1(data)),
    }
}

fn decode_utf32(data: &[u8], conversion: fn([u8; 4]) -> u32) -> Option<String> {
    let chunks = data.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return None;
    }
    chunks
        .map(|chunk| char::from_u32(conversion([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect()
}

fn decode_utf16(data: &[u8], conversion: fn([u8; 2]) -> u16) -> Option<String> {
    let chunks = data.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return None;
    }
    let units: Vec<u16> = chunks.map(|chunk| conversion([chunk[0], chunk[1]])).collect();
    String::from_utf16(&units).ok()
}

// every byte sequence is valid Latin-1, and its code points are the first 256 of unicode
fn latin1(data: &[u8]) -> String {
    data.iter().map(|byte| char::from(*byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn encode_utf16(text: &str, big_endian: bool) -> Vec<u8> {
        text.encode_utf16()
            .flat_map(|unit| {
                if big_endian {
                    unit.to_be_bytes()
                } else {
                    unit.to_le_bytes()
                }
            })
            .collect()
    }

    fn encode_utf32(text: &str, big_endian: bool) -> Vec<u8> {
        text.chars()
            .flat_map(|c| {
                if big_endian {
                    u32::from(c).to_be_bytes()
                } else {
                    u32::from(c).to_le_bytes()
                }
            })
            .collect()
    }

    #[test]
    fn detection() {
        let cases = [
            (encode_utf32("\u{feff}AB", true), Encoding::Utf32Be),
            (encode_utf32("AB", true), Encoding::Utf32Be),
            (encode_utf32("\u{feff}AB", false), Encoding::Utf32Le),
            (encode_utf32("AB", false), Encoding::Utf32Le),
            (encode_utf16("\u{feff}AB", true), Encoding::Utf16Be),
            (encode_utf16("AB", true), Encoding::Utf16Be),
            (encode_utf16("\u{feff}AB", false), Encoding::Utf16Le),
            (encode_utf16("AB", false), Encoding::Utf16Le),
            (b"\xef\xbb\xbfAB".to_vec(), Encoding::Utf8),
            ("/* \u{a9} */".as_bytes().to_vec(), Encoding::Utf8),
            (vec![b'A', 0xa9], Encoding::Latin1),
        ];
        for (data, encoding) in cases {
            assert_eq!(detect_encoding(&data), encoding, "{data:?}");
            let (text, used) = decode_text(&data);
            assert_eq!(used, encoding);
            assert!(text.trim_start_matches('\u{feff}').starts_with(['A', '/']));
        }
    }

    #[test]
    fn wrong_guess() {
        // mixed byte order looks like UTF-32BE at first, but the second character is invalid
        let data: Vec<u8> = vec![0, 0, 0, 65, 66, 0, 0, 0];
        let (text, encoding) = decode_text(&data);
        assert_eq!(encoding, Encoding::Utf8);
        assert_ne!(text, "AB");

        // odd length
        let data: Vec<u8> = vec![65, 0, 66];
        assert_eq!(decode(&data, Encoding::Utf16Le), None);
        assert_eq!(decode_text(&data).1, Encoding::Utf8);

        // an unpaired surrogate is not valid UTF-16, and the data is not UTF-8 either
        let data: Vec<u8> = vec![0, 65, 0xd8, 0x00];
        let (text, encoding) = decode_text(&data);
        assert_eq!(encoding, Encoding::Latin1);
        assert_eq!(text, "\0A\u{d8}\0");
    }

    #[test]
    fn latin1_text() {
        let (text, encoding) = decode_text(&[b'"', 0xb5, b's', b'"']);
        assert_eq!(encoding, Encoding::Latin1);
        assert_eq!(text, "\"\u{b5}s\"");
    }

    #[test]
    fn load_nonexistent_file() {
        assert!(matches!(
            load(Path::new("file/does/not/exist")),
            Err(A2lError::FileOpenError { .. })
        ));
    }

    #[test]
    fn load_file() {
        let dir = tempdir().unwrap();

        // UTF-16 little endian with BOM
        let filename = dir.path().join("utf16.a2l");
        let mut file = std::fs::File::create_new(&filename).unwrap();
        file.write_all(&encode_utf16("\u{feff}ASAP2_VERSION 1 71", false))
            .unwrap();
        assert_eq!(load(&filename).unwrap(), "ASAP2_VERSION 1 71");

        // UTF-32 big endian without BOM
        let filename = dir.path().join("utf32.a2l");
        let mut file = std::fs::File::create_new(&filename).unwrap();
        file.write_all(&encode_utf32("ASAP2_VERSION 1 71", true)).unwrap();
        assert_eq!(load(&filename).unwrap(), "ASAP2_VERSION 1 71");

        // UTF-8 with BOM
        let filename = dir.path().join("utf8.a2l");
        let mut file = std::fs::File::create_new(&filename).unwrap();
        file.write_all(b"\xef\xbb\xbfASAP2_VERSION 1 71").unwrap();
        assert_eq!(load(&filename).unwrap(), "ASAP2_VERSION 1 71");

        // only whitespace, and only a BOM
        for (name, data) in [("empty.a2l", &b"  \n "[..]), ("bom.a2l", &b"\xef\xbb\xbf"[..])] {
            let filename = dir.path().join(name);
            let mut file = std::fs::File::create_new(&filename).unwrap();
            file.write_all(data).unwrap();
            assert!(matches!(
                load(&filename),
                Err(A2lError::EmptyFileError { .. })
            ));
        }
    }
}
