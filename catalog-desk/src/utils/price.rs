//! 价格转换工具模块
//!
//! 提供美元 <-> 美分之间的转换函数，确保金额计算的精度。

/// 将美元转换为美分 (四舍五入)
///
/// # Examples
///
/// ```
/// use catalog_desk::utils::price::dollars_to_cents;
///
/// assert_eq!(dollars_to_cents(12.50), 1250);
/// assert_eq!(dollars_to_cents(0.01), 1);
/// assert_eq!(dollars_to_cents(100.00), 10000);
/// ```
pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// 将美分转换为美元
///
/// # Examples
///
/// ```
/// use catalog_desk::utils::price::cents_to_dollars;
///
/// assert!((cents_to_dollars(1250) - 12.50).abs() < 0.001);
/// assert!((cents_to_dollars(1) - 0.01).abs() < 0.001);
/// ```
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// 格式化金额为货币字符串 (美元)
///
/// # Examples
///
/// ```
/// use catalog_desk::utils::price::format_usd;
///
/// assert_eq!(format_usd(1250), "12.50 USD");
/// assert_eq!(format_usd(10000), "100 USD");
/// ```
pub fn format_usd(cents: i64) -> String {
    if cents % 100 == 0 {
        format!("{} USD", cents / 100)
    } else {
        format!("{:.2} USD", cents_to_dollars(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollars_to_cents() {
        assert_eq!(dollars_to_cents(12.50), 1250);
        assert_eq!(dollars_to_cents(0.01), 1);
        assert_eq!(dollars_to_cents(0.00), 0);
    }

    #[test]
    fn test_round_trip() {
        for price in [0.01, 0.99, 1.00, 12.50, 99.99, 100.00, 999.99] {
            let cents = dollars_to_cents(price);
            let back = cents_to_dollars(cents);
            assert!((back - price).abs() < 0.001, "Failed for {}", price);
        }
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1250), "12.50 USD");
        assert_eq!(format_usd(100_00), "100 USD");
        assert_eq!(format_usd(1000_00), "1000 USD");
        assert_eq!(format_usd(99), "0.99 USD");
    }
}
