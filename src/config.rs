use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::menu::{Menu, MenuContents, MenuSettings, PathIndex};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Printed above the menu on every full render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Whether the interactive session clears the terminal before rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_screen: Option<bool>,

    /// Extra brief indent added per level of nesting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_per_level: Option<u16>,

    #[serde(default)]
    pub defaults: SettingsConfig,

    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// Partial [`MenuSettings`]; unset fields fall through to the next layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_after_bullet: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_indent: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_indent: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_line_length: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl SettingsConfig {
    pub fn apply(&self, base: MenuSettings) -> MenuSettings {
        MenuSettings {
            space_after_bullet: self.space_after_bullet.unwrap_or(base.space_after_bullet),
            brief_indent: self.brief_indent.unwrap_or(base.brief_indent),
            details_indent: self.details_indent.unwrap_or(base.details_indent),
            max_line_length: self.max_line_length.unwrap_or(base.max_line_length),
            hidden: self.hidden.unwrap_or(base.hidden),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    pub brief: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemConfig>,
}

impl ItemConfig {
    fn leaf(brief: &str, details: &str) -> Self {
        Self {
            brief: brief.to_string(),
            details: details.to_string(),
            settings: None,
            items: Vec::new(),
        }
    }

    fn branch(brief: &str, items: Vec<ItemConfig>) -> Self {
        Self {
            items,
            ..Self::leaf(brief, "")
        }
    }
}

impl Config {
    /// Starter menu used by `init` and when no config file exists.
    pub fn sample() -> Self {
        Self {
            title: Some("Main menu".to_string()),
            clear_screen: Some(true),
            indent_per_level: Some(3),
            defaults: SettingsConfig::default(),
            items: vec![
                ItemConfig::branch(
                    "File",
                    vec![
                        ItemConfig::leaf("New", "Start an empty document."),
                        ItemConfig::leaf("Open", "Load a document from disk."),
                        ItemConfig::leaf("Save", "Write the current document to disk."),
                    ],
                ),
                ItemConfig::branch(
                    "Settings",
                    vec![
                        ItemConfig::branch(
                            "Display",
                            vec![
                                ItemConfig::leaf("Line width", ""),
                                ItemConfig::leaf("Indentation", ""),
                            ],
                        ),
                        ItemConfig::leaf("Keyboard", ""),
                    ],
                ),
                ItemConfig::leaf("Help", "Navigate with the entry numbers, 'b' and 'q'."),
            ],
        }
    }

    pub fn count_items(&self) -> usize {
        fn count(items: &[ItemConfig]) -> usize {
            items.iter().map(|i| 1 + count(&i.items)).sum()
        }
        count(&self.items)
    }

    /// Builds the menu tree described by this config.
    pub fn build_menu(&self) -> Result<Menu> {
        let mut menu = Menu::new();
        let base = self.defaults.apply(MenuSettings::default());
        let mut path = Vec::new();
        self.insert_items(&mut menu, &mut path, &self.items, base)?;
        Ok(menu)
    }

    fn insert_items(
        &self,
        menu: &mut Menu,
        path: &mut Vec<PathIndex>,
        items: &[ItemConfig],
        base: MenuSettings,
    ) -> Result<()> {
        let depth = u16::try_from(path.len()).unwrap_or(u16::MAX);
        let level_indent = self.indent_per_level.unwrap_or(0).saturating_mul(depth);

        for (i, item) in items.iter().enumerate() {
            let mut settings = item.settings.unwrap_or_default().apply(base);
            settings.brief_indent = settings.brief_indent.saturating_add(level_indent);

            menu.insert_child(
                path,
                MenuContents::new(item.brief.as_str(), item.details.as_str()),
                settings,
            )
            .with_context(|| format!("adding menu entry '{}'", item.brief))?;

            let index = PathIndex::try_from(i)
                .map_err(|_| anyhow!("too many entries at one level"))?;
            path.push(index);
            self.insert_items(menu, path, &item.items, base)?;
            path.pop();
        }
        Ok(())
    }
}

pub fn load(path: &Path) -> Result<Config> {
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), items = cfg.count_items(), "loaded menu config");
    Ok(cfg)
}

/// Loads the config if one can be found. An explicit path must exist.
pub fn load_optional(explicit: Option<&Path>) -> Result<Option<Config>> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        return load(path).map(Some);
    }

    let Some(path) = resolve_config_path(None) else {
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using built-in menu");
        return Ok(None);
    }
    load(&path).map(Some)
}

pub const CONFIG_ENV: &str = "MENUCTL_CONFIG";
const LOCAL_CONFIG: &str = "menuctl.json";

/// Where the menu definition lives.
///
/// An explicit path wins, then `MENUCTL_CONFIG`, then `menuctl.json` in the
/// working directory if present, then the per-user config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(env_config_path)
        .or_else(|| Some(PathBuf::from(LOCAL_CONFIG)).filter(|p| p.exists()))
        .or_else(user_config_path)
        .map(|p| if p.is_dir() { p.join("config.json") } else { p })
}

fn env_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV)
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}

fn user_config_path() -> Option<PathBuf> {
    let base = match env::var_os("APPDATA") {
        Some(appdata) => PathBuf::from(appdata),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("menuctl").join("config.json"))
}

/// Writes the starter menu to the config path unless a file is already there.
pub fn ensure_config_file_exists(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_config_path(explicit).ok_or_else(|| {
        anyhow!("no config location: pass --config, set {CONFIG_ENV}, or set APPDATA/HOME")
    })?;
    if !path.exists() {
        write_template(&path)?;
        debug!(path = %path.display(), "wrote starter menu");
    }
    Ok(path)
}

fn write_template(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut json =
        serde_json::to_string_pretty(&Config::sample()).context("serializing starter menu")?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
