//! Report generators.

mod console;
mod markdown;

pub use console::ConsoleReportGenerator;
pub use markdown::MarkdownReportGenerator;

/// `$120.00` / `-$40.00`.
pub(crate) fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_sign_goes_before_symbol() {
        assert_eq!(money(120.0), "$120.00");
        assert_eq!(money(-40.0), "-$40.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1234.567), "$1234.57");
    }
}
