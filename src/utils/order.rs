use rand::Rng;

/// `PREFIX-NNNNN` with five random digits. Not guaranteed unique.
pub fn generate_order_id(prefix: &str) -> String {
    let number = rand::rng().random_range(10000..=99999);
    format!("{}-{}", prefix, number)
}

/// Click-to-chat link with the message pre-filled.
pub fn share_url(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_has_prefix_and_five_digits() {
        for _ in 0..50 {
            let id = generate_order_id("RS");
            let (prefix, digits) = id.split_once('-').unwrap();
            assert_eq!(prefix, "RS");
            assert_eq!(digits.len(), 5);
            let n: u32 = digits.parse().unwrap();
            assert!((10000..=99999).contains(&n));
        }
    }

    #[test]
    fn share_url_encodes_the_message() {
        let url = share_url("+961 71 854 885", "Hello, 2x Ring ($20.00)\nTotal");
        assert_eq!(
            url,
            "https://wa.me/96171854885?text=Hello%2C%202x%20Ring%20%28%2420.00%29%0ATotal"
        );
    }
}
