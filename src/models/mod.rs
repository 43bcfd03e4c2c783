pub mod bargain;
pub mod notification;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod user;

use uuid::Uuid;

/// Short entity id: `prefix` followed by the first 12 hex chars of a v4 UUID.
pub fn gen_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &hex[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_id_has_prefix_and_twelve_hex_chars() {
        let id = gen_id("p_");
        assert!(id.starts_with("p_"));
        assert_eq!(id.len(), 14);
        assert!(id[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn gen_id_is_unique() {
        assert_ne!(gen_id("o_"), gen_id("o_"));
    }
}
