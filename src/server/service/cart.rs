use sea_orm::DatabaseConnection;

use crate::server::{
    data::{cart::CartRepository, game::GameRepository, library::LibraryRepository},
    error::AppError,
    model::cart::Cart,
};

pub struct CartService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CartService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// The user's cart, created on first access.
    pub async fn get(&self, user_id: i32) -> Result<Cart, AppError> {
        let repo = CartRepository::new(self.db);
        let cart_id = repo.get_or_create(user_id).await?;

        Ok(repo.items(cart_id).await?)
    }

    /// Adds a published game at its current price.
    ///
    /// # Returns
    /// - `Ok(Cart)` - Updated cart
    /// - `Err(AppError::NotFound)` - Game missing or unpublished
    /// - `Err(AppError::BadRequest)` - Game already owned or already in the cart
    pub async fn add(&self, user_id: i32, game_id: i32) -> Result<Cart, AppError> {
        let game = match GameRepository::new(self.db).find_by_id(game_id).await? {
            Some(game) if game.is_published => game,
            _ => return Err(AppError::NotFound("Game not found".to_string())),
        };

        if LibraryRepository::new(self.db).owns(user_id, game_id).await? {
            return Err(AppError::BadRequest("You already own this game".to_string()));
        }

        let repo = CartRepository::new(self.db);
        let cart_id = repo.get_or_create(user_id).await?;

        if repo.contains(cart_id, game_id).await? {
            return Err(AppError::BadRequest(
                "Game is already in your cart".to_string(),
            ));
        }

        repo.add_item(cart_id, game.id, game.price_cents).await?;

        Ok(repo.items(cart_id).await?)
    }

    pub async fn remove(&self, user_id: i32, game_id: i32) -> Result<Cart, AppError> {
        let repo = CartRepository::new(self.db);
        let cart_id = repo.get_or_create(user_id).await?;

        if !repo.remove_item(cart_id, game_id).await? {
            return Err(AppError::NotFound("Game is not in your cart".to_string()));
        }

        Ok(repo.items(cart_id).await?)
    }

    pub async fn clear(&self, user_id: i32) -> Result<(), AppError> {
        let repo = CartRepository::new(self.db);
        let cart_id = repo.get_or_create(user_id).await?;

        Ok(repo.clear(cart_id).await?)
    }
}
