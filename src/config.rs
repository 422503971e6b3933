use log::LevelFilter;

/// Physical id of the hart that proceeds to the next stage.
pub const DESIGNATED_HART: usize = env_usize(option_env!("HARTBOOT_DESIGNATED_HART"), 0);

/// Maximum number of harts the platform is configured to use. Logical ids
/// `1..MAX_NODES - 1` get a secondary stack, everything past that is parked.
pub const MAX_NODES: usize = env_usize(option_env!("HARTBOOT_MAX_NODES"), 4);

/// Pages in the secondary stack arena, one per logical id in `1..MAX_NODES - 1`.
pub const SECONDARY_STACK_SLOTS: usize = MAX_NODES.saturating_sub(2);

/// Physical hart ids below this get an entry stack and run the election in
/// Rust. Higher ids run the same election in registers from the entry code.
pub const MAX_HART_ID: usize = env_usize(option_env!("HARTBOOT_MAX_HART_ID"), 32);

pub const STACK_STRIDE: usize = 4096;
pub const PRIMARY_STACK_SIZE: usize = 4 * STACK_STRIDE;
pub const ENTRY_STACK_SIZE: usize = 4096;

pub const LOG_LEVEL: LevelFilter = env_level(option_env!("HARTBOOT_LOG"), LevelFilter::Info);

pub const UART_BASE: usize = env_usize(option_env!("HARTBOOT_UART_BASE"), 0x1000_0000);

const _: () = assert!(MAX_NODES >= 1, "HARTBOOT_MAX_NODES must be at least 1");
const _: () = assert!(ENTRY_STACK_SIZE % 16 == 0 && STACK_STRIDE % 16 == 0);

const fn env_usize(value: Option<&str>, default: usize) -> usize {
    match value {
        Some(s) => parse_usize(s.as_bytes()),
        None => default,
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal number, `_` separators allowed.
/// Called in const context only, so a bad value is a build error.
const fn parse_usize(bytes: &[u8]) -> usize {
    let hex = bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X');
    let (radix, mut i) = if hex { (16, 2) } else { (10, 0) };
    assert!(i < bytes.len(), "empty number");

    let mut value: usize = 0;
    while i < bytes.len() {
        let digit = match bytes[i] {
            b'_' => {
                i += 1;
                continue;
            }
            c @ b'0'..=b'9' => (c - b'0') as usize,
            c @ b'a'..=b'f' if radix == 16 => (c - b'a' + 10) as usize,
            c @ b'A'..=b'F' if radix == 16 => (c - b'A' + 10) as usize,
            _ => panic!("invalid digit in number"),
        };
        value = match value.checked_mul(radix) {
            Some(v) => match v.checked_add(digit) {
                Some(v) => v,
                None => panic!("number overflows usize"),
            },
            None => panic!("number overflows usize"),
        };
        i += 1;
    }
    value
}

const fn env_level(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    match value {
        Some(s) => parse_level(s.as_bytes()),
        None => default,
    }
}

const fn parse_level(bytes: &[u8]) -> LevelFilter {
    if eq_ignore_case(bytes, b"off") {
        LevelFilter::Off
    } else if eq_ignore_case(bytes, b"error") {
        LevelFilter::Error
    } else if eq_ignore_case(bytes, b"warn") {
        LevelFilter::Warn
    } else if eq_ignore_case(bytes, b"info") {
        LevelFilter::Info
    } else if eq_ignore_case(bytes, b"debug") {
        LevelFilter::Debug
    } else if eq_ignore_case(bytes, b"trace") {
        LevelFilter::Trace
    } else {
        panic!("HARTBOOT_LOG must be one of off, error, warn, info, debug, trace")
    }
}

const fn eq_ignore_case(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex() {
        assert_eq!(parse_usize(b"0"), 0);
        assert_eq!(parse_usize(b"42"), 42);
        assert_eq!(parse_usize(b"0x1000_0000"), 0x1000_0000);
        assert_eq!(parse_usize(b"0XfF"), 255);
        assert_eq!(parse_usize(b"1_000"), 1000);
    }

    #[test]
    #[should_panic]
    fn rejects_garbage() {
        parse_usize(b"12a");
    }

    #[test]
    fn parses_levels() {
        assert_eq!(parse_level(b"off"), LevelFilter::Off);
        assert_eq!(parse_level(b"WARN"), LevelFilter::Warn);
        assert_eq!(parse_level(b"Trace"), LevelFilter::Trace);
    }

    #[test]
    fn defaults_fit_together() {
        assert_eq!(PRIMARY_STACK_SIZE % STACK_STRIDE, 0);
        assert_eq!(SECONDARY_STACK_SLOTS + 2, MAX_NODES.max(2));
    }
}
