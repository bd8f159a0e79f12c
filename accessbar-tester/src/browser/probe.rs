//! Reads and drives the toolbar on a live page through `WebDriver`.

use anyhow::{Context, Result};
use regex::Regex;
use thirtyfour::prelude::*;

use accessbar_core::constants::TOGGLE_BUTTON_ID;
use accessbar_core::{ControlId, ToolbarAction, expiry_assignment, find_cookie};

const TOKEN_PATTERN: &str = r"\baccess(?:TextSize[1-4]|LightContrast|DarkContrast|RemoveAssets)\b";

const PRESS_ESCAPE_SCRIPT: &str = r"
const target = document.getElementById(arguments[0]) || document.body;
target.dispatchEvent(new KeyboardEvent('keydown', { key: 'Escape', bubbles: true }));";

pub struct PageProbe<'a> {
    driver: &'a WebDriver,
    cookie_name: String,
    tokens: Regex,
}

impl<'a> PageProbe<'a> {
    pub fn new(driver: &'a WebDriver, cookie_name: &str) -> Result<Self> {
        Ok(Self {
            driver,
            cookie_name: cookie_name.to_string(),
            tokens: Regex::new(TOKEN_PATTERN).context("compiling token pattern")?,
        })
    }

    /// Load `url` with no stored snapshot and wait for the toolbar to mount.
    pub async fn open_fresh(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        self.driver
            .execute(
                "document.cookie = arguments[0];",
                vec![expiry_assignment(&self.cookie_name).into()],
            )
            .await?;
        self.reload().await
    }

    pub async fn reload(&self) -> Result<()> {
        self.driver.refresh().await?;
        self.driver
            .find(By::Id(TOGGLE_BUTTON_ID))
            .await
            .context("toolbar toggle never appeared")?;
        Ok(())
    }

    pub async fn perform(&self, action: ToolbarAction) -> Result<()> {
        match action {
            ToolbarAction::CloseMenu => {
                self.driver
                    .execute(PRESS_ESCAPE_SCRIPT, vec![TOGGLE_BUTTON_ID.into()])
                    .await?;
            }
            ToolbarAction::ToggleMenu => self.click(TOGGLE_BUTTON_ID).await?,
            other => {
                let control = ControlId::for_action(other)
                    .with_context(|| format!("no control for `{}`", other.id()))?;
                self.click(control.dom_id()).await?;
            }
        }
        Ok(())
    }

    async fn click(&self, id: &str) -> Result<()> {
        self.driver
            .find(By::Id(id))
            .await
            .with_context(|| format!("missing #{id}"))?
            .click()
            .await?;
        Ok(())
    }

    /// Preference tokens currently on `<html>`, sorted.
    pub async fn root_tokens(&self) -> Result<Vec<String>> {
        let ret = self
            .driver
            .execute("return document.documentElement.className;", vec![])
            .await?;
        let class_name = ret.json().as_str().unwrap_or_default().to_string();
        Ok(self.extract_tokens(&class_name))
    }

    fn extract_tokens(&self, class_name: &str) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .tokens
            .find_iter(class_name)
            .map(|found| found.as_str().to_string())
            .collect();
        tokens.sort();
        tokens
    }

    pub async fn menu_open(&self) -> Result<bool> {
        let expanded = self
            .driver
            .find(By::Id(TOGGLE_BUTTON_ID))
            .await?
            .attr("aria-expanded")
            .await?;
        Ok(expanded.as_deref() == Some("true"))
    }

    /// The decoded snapshot cookie, empty when absent.
    pub async fn snapshot(&self) -> Result<String> {
        let ret = self.driver.execute("return document.cookie;", vec![]).await?;
        let header = ret.json().as_str().unwrap_or_default().to_string();
        Ok(decode_snapshot(&header, &self.cookie_name))
    }

    pub async fn label(&self, control: ControlId) -> Result<String> {
        let text = self
            .driver
            .find(By::Id(control.dom_id()))
            .await?
            .text()
            .await?;
        Ok(text.trim().to_string())
    }
}

/// Token values only ever need spaces escaped.
fn decode_snapshot(header: &str, cookie_name: &str) -> String {
    find_cookie(header, cookie_name)
        .map(|value| value.replace("%20", " "))
        .unwrap_or_default()
}
