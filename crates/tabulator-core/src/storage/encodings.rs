//! Candidate text encodings for delimited-text recovery.

use std::fmt;
use std::sync::LazyLock;

use encoding_rs::{
    BIG5, EUC_JP, EUC_KR, Encoding, GB18030, GBK, IBM866, ISO_2022_JP, ISO_8859_2, ISO_8859_3,
    ISO_8859_4, ISO_8859_5, ISO_8859_6, ISO_8859_7, ISO_8859_8, ISO_8859_10, ISO_8859_13,
    ISO_8859_14, ISO_8859_15, ISO_8859_16, KOI8_R, KOI8_U, MACINTOSH, SHIFT_JIS, UTF_8, UTF_16BE,
    UTF_16LE, WINDOWS_874, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252, WINDOWS_1253, WINDOWS_1254,
    WINDOWS_1255, WINDOWS_1256, WINDOWS_1257, WINDOWS_1258, X_MAC_CYRILLIC,
};

const UTF_8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One way of turning raw file bytes into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    /// 7-bit ASCII only.
    Ascii,
    /// UTF-8 that must start with a byte-order mark.
    Utf8Bom,
    /// UTF-16 (either byte order) that must start with a byte-order mark.
    Utf16Bom,
    /// Any `encoding_rs` encoding, no BOM handling.
    Plain(&'static Encoding),
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match *self {
            TextEncoding::Ascii => "ascii",
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Utf16Bom => "utf-16",
            TextEncoding::Plain(encoding) => encoding.name(),
        }
    }

    /// Strictly decode `bytes`; `None` on any malformed sequence or missing BOM.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match *self {
            TextEncoding::Ascii => bytes
                .is_ascii()
                .then(|| String::from_utf8_lossy(bytes).into_owned()),
            TextEncoding::Utf8Bom => {
                let body = bytes.strip_prefix(UTF_8_BOM)?;
                decode_strict(UTF_8, body)
            }
            TextEncoding::Utf16Bom => match Encoding::for_bom(bytes)? {
                (encoding, bom_len) if encoding == UTF_16LE || encoding == UTF_16BE => {
                    decode_strict(encoding, &bytes[bom_len..])
                }
                _ => None,
            },
            TextEncoding::Plain(encoding) => decode_strict(encoding, bytes),
        }
    }
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered candidates: BOM-marked Unicode, then ASCII and UTF-8, then the
/// strict multi-byte encodings, BOM-less UTF-16, and finally the single-byte
/// code pages (which accept almost any input).
pub static CANDIDATES: LazyLock<Vec<TextEncoding>> = LazyLock::new(|| {
    let mut candidates = vec![
        TextEncoding::Utf8Bom,
        TextEncoding::Utf16Bom,
        TextEncoding::Ascii,
    ];
    let plain: &[&'static Encoding] = &[
        UTF_8,
        SHIFT_JIS,
        EUC_JP,
        ISO_2022_JP,
        EUC_KR,
        BIG5,
        GBK,
        GB18030,
        UTF_16LE,
        UTF_16BE,
        WINDOWS_1250,
        WINDOWS_1251,
        WINDOWS_1252,
        WINDOWS_1253,
        WINDOWS_1254,
        WINDOWS_1255,
        WINDOWS_1256,
        WINDOWS_1257,
        WINDOWS_1258,
        WINDOWS_874,
        ISO_8859_2,
        ISO_8859_3,
        ISO_8859_4,
        ISO_8859_5,
        ISO_8859_6,
        ISO_8859_7,
        ISO_8859_8,
        ISO_8859_10,
        ISO_8859_13,
        ISO_8859_14,
        ISO_8859_15,
        ISO_8859_16,
        KOI8_R,
        KOI8_U,
        IBM866,
        MACINTOSH,
        X_MAC_CYRILLIC,
    ];
    candidates.extend(plain.iter().copied().map(TextEncoding::Plain));
    candidates
});
