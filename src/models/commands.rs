use serde::{Deserialize, Deserializer};
use std::fmt;

/// Body of `POST /` — create a client, optionally with a caller-chosen
/// username.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSaveCommand {
    pub username: Option<String>,
    pub name: String,
}

/// Body of `POST /cart` — add a product to a client's cart.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSaveCommand {
    pub username: String,
    pub name: String,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub amount: u32,
}

/// Body of `DELETE /cart` — remove one product from a client's cart.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDeleteCommand {
    pub id: String,
    pub username: String,
}

/// The upstream load generator posts `"amount": "1"` as a string while the
/// documented body uses a number; accept both.
fn u32_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

// Commands echo back into error strings, so they need readable renderings.
impl fmt::Display for ClientSaveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClientSaveCommand = {{ username = {}, name = {} }}",
            self.username.as_deref().unwrap_or("null"),
            self.name
        )
    }
}

impl fmt::Display for ProductSaveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProductSaveCommand = {{ username = {}, name = {}, amount = {} }}",
            self.username, self.name, self.amount
        )
    }
}

impl fmt::Display for ProductDeleteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProductDeleteCommand = {{ id = {}, username = {} }}",
            self.id, self.username
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_save_command_without_username() {
        let cmd: ClientSaveCommand = serde_json::from_str(r#"{ "name": "myname" }"#).unwrap();
        assert!(cmd.username.is_none());
        assert_eq!(cmd.name, "myname");
    }

    #[test]
    fn test_product_save_command_numeric_amount() {
        let cmd: ProductSaveCommand =
            serde_json::from_str(r#"{ "username": "user0", "name": "Banana", "amount": 2 }"#)
                .unwrap();
        assert_eq!(cmd.amount, 2);
    }

    #[test]
    fn test_product_save_command_string_amount() {
        let cmd: ProductSaveCommand =
            serde_json::from_str(r#"{ "username": "user0", "name": "Banana", "amount": "1" }"#)
                .unwrap();
        assert_eq!(cmd.amount, 1);
    }

    #[test]
    fn test_product_save_command_rejects_garbage_amount() {
        let result: Result<ProductSaveCommand, _> =
            serde_json::from_str(r#"{ "username": "user0", "name": "Banana", "amount": "many" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_product_delete_command_display() {
        let cmd: ProductDeleteCommand =
            serde_json::from_str(r#"{ "id": "user0$0", "username": "user0" }"#).unwrap();
        assert_eq!(
            cmd.to_string(),
            "ProductDeleteCommand = { id = user0$0, username = user0 }"
        );
    }
}
