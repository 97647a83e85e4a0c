use std::io;

use menukit_core::error::MenuError;

pub fn encode_wide(string: &str) -> Vec<u16> {
    string.encode_utf16().chain(std::iter::once(0)).collect()
}

pub fn decode_wide(mut wide: &[u16]) -> String {
    if let Some(null_pos) = wide.iter().position(|c| *c == 0) {
        wide = &wide[..null_pos];
    }
    String::from_utf16_lossy(wide)
}

pub fn win_to_err(result: i32, operation: &'static str) -> Result<(), MenuError> {
    if result != 0 { Ok(()) } else { Err(last_error(operation)) }
}

pub fn last_error(operation: &'static str) -> MenuError {
    MenuError::native(operation, io::Error::last_os_error().raw_os_error().unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_round_trip() {
        let wide = encode_wide("Example");
        assert_eq!(wide.last(), Some(&0));
        assert_eq!(decode_wide(&wide), "Example");
    }

    #[test]
    fn decode_stops_at_the_terminator() {
        let wide = [b'H' as u16, b'i' as u16, 0, b'!' as u16];
        assert_eq!(decode_wide(&wide), "Hi");
    }
}
