// src/services/cartoon_service.rs
use std::sync::Arc;

use crate::domain::{validate_cartoon_input, Cartoon};
use crate::error::{AppError, AppResult};
use crate::repositories::CartoonRepository;

pub struct CartoonService {
    cartoons: Arc<dyn CartoonRepository>,
}

impl CartoonService {
    pub fn new(cartoons: Arc<dyn CartoonRepository>) -> Self {
        Self { cartoons }
    }

    pub fn list_titles(&self) -> AppResult<Vec<String>> {
        self.cartoons.list_titles()
    }

    pub fn find_cartoon(&self, title: &str) -> AppResult<Option<Cartoon>> {
        self.cartoons.find_by_title(title)
    }

    /// Adds a cartoon. Rejects blank fields and an already-catalogued
    /// title before touching the store.
    pub fn add_cartoon(&self, title: &str, description: &str) -> AppResult<Cartoon> {
        validate_cartoon_input(title, description)?;

        if self.cartoons.find_by_title(title)?.is_some() {
            log::warn!("cartoon '{}' already exists, add rejected", title);
            return Err(AppError::AlreadyExists(format!("cartoon '{}'", title)));
        }

        self.cartoons.add(title, description)
    }

    /// Updates an existing cartoon, identified by primary key.
    pub fn update_cartoon(&self, cartoon: &Cartoon) -> AppResult<()> {
        validate_cartoon_input(&cartoon.title, &cartoon.description)?;
        self.cartoons.update(cartoon)
    }
}
