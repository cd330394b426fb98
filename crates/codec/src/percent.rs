//! Percent-encoding for query components
//!
//! Encoding follows component rules: every byte outside the unreserved set
//! (`A-Z a-z 0-9 - _ . ~`) is emitted as `%XX`. Decoding accepts any `%XX`
//! sequence and treats `+` as a space; malformed escapes pass through as
//! literal text rather than failing, since a query string arrives from an
//! address bar the user can edit freely.

const UPPERHEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

/// Percent-encode a query component
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(UPPERHEX[(byte >> 4) as usize] as char);
            out.push(UPPERHEX[(byte & 0x0F) as usize] as char);
        }
    }
    out
}

/// Percent-decode a query component, treating `+` as space
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    // Malformed escape passes through
                    out.push(b'%');
                    i += 1;
                }
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(byte: Option<&u8>) -> Option<u8> {
    match byte? {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b @ b'a'..=b'f' => Some(b - b'a' + 10),
        b @ b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_unreserved_passes_through() {
        assert_eq!(encode("abc-DEF_123.~"), "abc-DEF_123.~");
    }

    #[test]
    fn test_encode_reserved() {
        assert_eq!(encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode("a[b]"), "a%5Bb%5D");
        assert_eq!(encode("?#/"), "%3F%23%2F");
    }

    #[test]
    fn test_encode_utf8_multibyte() {
        assert_eq!(encode("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_basic() {
        assert_eq!(decode("a%20b"), "a b");
        assert_eq!(decode("a%5Bb%5D"), "a[b]");
    }

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(decode("a+b"), "a b");
    }

    #[test]
    fn test_decode_lowercase_hex() {
        assert_eq!(decode("%c3%a9"), "é");
    }

    #[test]
    fn test_decode_malformed_escape_passes_through() {
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%zz"), "%zz");
        assert_eq!(decode("%1"), "%1");
    }

    #[test]
    fn test_round_trip() {
        for s in ["plain", "a b c", "key=value&other", "emoji 🎉", "100%"] {
            assert_eq!(decode(&encode(s)), s);
        }
    }
}
