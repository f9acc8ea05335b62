use crate::domain::model::Cart;
use crate::domain::ports::CartStore;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Keeps the cart as `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    base_path: PathBuf,
    key: String,
}

impl FileCartStore {
    pub fn new(base_path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            key: key.into(),
        }
    }

    pub fn blob_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", self.key))
    }

    fn staging_path(&self) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", self.key))
    }
}

impl CartStore for FileCartStore {
    async fn load(&self) -> Result<Option<Cart>> {
        let path = self.blob_path();
        let blob = match tokio::fs::read_to_string(&path).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No stored cart at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if blob.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&blob)?))
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        let blob = serde_json::to_vec(cart)?;
        tokio::fs::create_dir_all(&self.base_path).await?;

        // write-then-rename: readers see the old blob or the new one, never half
        let staging = self.staging_path();
        tokio::fs::write(&staging, &blob).await?;
        tokio::fs::rename(&staging, self.blob_path()).await?;

        tracing::debug!(
            "Saved cart ({} bytes) to {}",
            blob.len(),
            self.blob_path().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CartLine, Product};
    use tempfile::TempDir;

    fn sample_cart() -> Cart {
        Cart::new()
            .with_line(CartLine {
                product: Product {
                    id: 1,
                    title: "Tênis de Caminhada Leve Confortável".to_string(),
                    price: 179.9,
                    image: "https://cdn.example.com/1.jpg".to_string(),
                    extra: Default::default(),
                },
                amount: 2,
            })
            .with_line(CartLine::new(Product {
                id: 3,
                title: "Tênis Adidas Duramo Lite 2.0".to_string(),
                price: 219.9,
                image: "https://cdn.example.com/3.jpg".to_string(),
                extra: Default::default(),
            }))
    }

    #[tokio::test]
    async fn test_missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileCartStore::new(dir.path(), "cart");

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_returns_same_cart() {
        let dir = TempDir::new().unwrap();
        let store = FileCartStore::new(dir.path().join("nested"), "rocketshoes-cart");
        let cart = sample_cart();

        store.save(&cart).await.unwrap();

        assert!(dir.path().join("nested/rocketshoes-cart.json").exists());
        assert_eq!(store.load().await.unwrap(), Some(cart));
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_blob() {
        let dir = TempDir::new().unwrap();
        let store = FileCartStore::new(dir.path(), "cart");

        store.save(&sample_cart()).await.unwrap();
        store.save(&Cart::new()).await.unwrap();

        let content = std::fs::read_to_string(store.blob_path()).unwrap();
        assert_eq!(content, "[]");
        assert!(!store.staging_path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileCartStore::new(dir.path(), "cart");
        std::fs::write(store.blob_path(), "{broken").unwrap();

        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileCartStore::new(dir.path(), "cart");
        std::fs::write(store.blob_path(), "  \n").unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }
}
