//! Blocking `dialoguer` prompts moved off the async runtime.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

pub async fn select(prompt: &str, items: &[&'static str]) -> Result<usize> {
    let prompt = prompt.to_string();
    let items = items.to_vec();
    tokio::task::spawn_blocking(move || -> Result<usize> {
        Ok(Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()?)
    })
    .await?
}

/// Free text, pre-filled with `initial` when it is not empty.
pub async fn text(prompt: &str, initial: &str) -> Result<String> {
    let prompt = prompt.to_string();
    let initial = initial.to_string();
    tokio::task::spawn_blocking(move || -> Result<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !initial.is_empty() {
            input = input.with_initial_text(initial);
        }
        Ok(input.interact_text()?)
    })
    .await?
}

pub async fn secret(prompt: &str) -> Result<String> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || -> Result<String> {
        Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?)
    })
    .await?
}

pub async fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || -> Result<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    })
    .await?
}
