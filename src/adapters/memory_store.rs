use crate::domain::model::Cart;
use crate::domain::ports::CartStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Namespace → serialized cart blob, kept in process. Clones share the map.
#[derive(Debug, Clone)]
pub struct MemoryCartStore {
    key: String,
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCartStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            blobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A store that starts out holding `blob` under `key`.
    pub fn with_blob(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let key = key.into();
        let mut blobs = HashMap::new();
        blobs.insert(key.clone(), blob.into());
        Self {
            key,
            blobs: Arc::new(Mutex::new(blobs)),
        }
    }

    /// The stored blob exactly as written.
    pub async fn raw(&self) -> Option<String> {
        self.blobs.lock().await.get(&self.key).cloned()
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<Option<Cart>> {
        let blobs = self.blobs.lock().await;
        match blobs.get(&self.key) {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        let blob = serde_json::to_string(cart)?;
        let mut blobs = self.blobs.lock().await;
        blobs.insert(self.key.clone(), blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CartLine, Product};

    #[tokio::test]
    async fn test_empty_store_loads_nothing() {
        let store = MemoryCartStore::new("cart");
        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(store.raw().await, None);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_blob() {
        let store = MemoryCartStore::with_blob("cart", r#"[{"id":1,"title":"A","price":1.0,"image":"a","amount":1}]"#);
        let cart = Cart::new().with_line(CartLine::new(Product {
            id: 2,
            title: "B".to_string(),
            price: 2.5,
            image: "b".to_string(),
            extra: Default::default(),
        }));

        store.save(&cart).await.unwrap();

        assert_eq!(
            store.raw().await.unwrap(),
            r#"[{"id":2,"title":"B","price":2.5,"image":"b","amount":1}]"#
        );
        assert_eq!(store.load().await.unwrap(), Some(cart));
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error() {
        let store = MemoryCartStore::with_blob("cart", "not json");
        assert!(store.load().await.is_err());
    }
}
