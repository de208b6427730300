//! Colour themes and their application to a style root.

use crate::error::{LensCoachError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// A colour theme: a fixed set of CSS custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon gradient as `(from, to)` colours.
    pub icon_gradient: (&'static str, &'static str),
    /// CSS variable name to value.
    pub colors: &'static [(&'static str, &'static str)],
}

/// Returns every theme, in display order. The first is the default.
pub fn themes() -> &'static [Theme] {
    THEMES
}

/// Finds a theme by id.
pub fn find_theme(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id.trim())
}

/// Receives CSS variables when the active theme changes.
pub trait ThemeSink {
    /// Sets one custom property on the visual root.
    fn set_property(&mut self, name: &str, value: &str);
}

/// In-memory style root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssVariables {
    properties: BTreeMap<String, String>,
}

impl CssVariables {
    /// Creates an empty style root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if nothing has been applied.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Renders the properties as a `:root` rule.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push('}');
        css
    }
}

impl ThemeSink for CssVariables {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}

/// Tracks the active theme and pushes it to a sink on every change.
#[derive(Debug)]
pub struct ThemeController<S: ThemeSink> {
    active: &'static Theme,
    sink: S,
}

impl<S: ThemeSink> ThemeController<S> {
    /// Activates the default theme and applies it immediately.
    pub fn new(sink: S) -> Self {
        let mut controller = Self {
            active: &THEMES[0],
            sink,
        };
        controller.apply();
        controller
    }

    /// Switches to the theme with `id` and applies it.
    pub fn set_active(&mut self, id: &str) -> Result<&'static Theme> {
        let theme = find_theme(id)
            .ok_or_else(|| LensCoachError::InvalidRequest(format!("unknown theme: {id}")))?;
        self.active = theme;
        self.apply();
        tracing::debug!(theme = theme.id, "applied theme");
        Ok(theme)
    }

    /// The active theme.
    pub fn active(&self) -> &'static Theme {
        self.active
    }

    /// The sink the theme is applied to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn apply(&mut self) {
        for (name, value) in self.active.colors {
            self.sink.set_property(name, value);
        }
    }
}

static THEMES: &[Theme] = &[
    Theme {
        id: "sky-dark",
        name: "Sky",
        icon_gradient: ("#38bdf8", "#3b82f6"),
        colors: &[
            ("--background-primary", "#111827"),
            ("--text-primary", "#f9fafb"),
            ("--text-secondary", "#9ca3af"),
            ("--accent-primary", "#7dd3fc"),
            ("--accent-ring", "#38bdf8"),
            ("--accent-focus", "#0ea5e9"),
            ("--accent-button-text", "#ffffff"),
            ("--accent-gradient-from", "#38bdf8"),
            ("--accent-gradient-to", "#3b82f6"),
            ("--error", "#f87171"),
            ("--background-secondary-rgb", "31 41 55"),
            ("--background-tertiary-rgb", "55 65 81"),
            ("--background-hover-rgb", "75 85 99"),
            ("--accent-bg-hover-rgb", "2 132 199"),
            ("--accent-active-bg-rgb", "12 74 110"),
            ("--border-primary-rgb", "75 85 99"),
            ("--background-primary-rgb", "17 24 39"),
        ],
    },
    Theme {
        id: "sunset-dark",
        name: "Sunset",
        icon_gradient: ("#fb923c", "#f43f5e"),
        colors: &[
            ("--background-primary", "#1c1917"),
            ("--text-primary", "#fef3c7"),
            ("--text-secondary", "#a8a29e"),
            ("--accent-primary", "#fb923c"),
            ("--accent-ring", "#f97316"),
            ("--accent-focus", "#ea580c"),
            ("--accent-button-text", "#ffffff"),
            ("--accent-gradient-from", "#fb923c"),
            ("--accent-gradient-to", "#f43f5e"),
            ("--error", "#fca5a5"),
            ("--background-secondary-rgb", "41 37 36"),
            ("--background-tertiary-rgb", "68 64 60"),
            ("--background-hover-rgb", "87 83 78"),
            ("--accent-bg-hover-rgb", "234 88 12"),
            ("--accent-active-bg-rgb", "124 45 18"),
            ("--border-primary-rgb", "87 83 78"),
            ("--background-primary-rgb", "28 25 23"),
        ],
    },
    Theme {
        id: "forest-dark",
        name: "Forest",
        icon_gradient: ("#4ade80", "#16a34a"),
        colors: &[
            ("--background-primary", "#1a2e05"),
            ("--text-primary", "#ecfccb"),
            ("--text-secondary", "#a3e635"),
            ("--accent-primary", "#86efac"),
            ("--accent-ring", "#4ade80"),
            ("--accent-focus", "#22c55e"),
            ("--accent-button-text", "#052e16"),
            ("--accent-gradient-from", "#4ade80"),
            ("--accent-gradient-to", "#16a34a"),
            ("--error", "#f87171"),
            ("--background-secondary-rgb", "20 83 45"),
            ("--background-tertiary-rgb", "21 128 61"),
            ("--background-hover-rgb", "22 163 74"),
            ("--accent-bg-hover-rgb", "22 101 52"),
            ("--accent-active-bg-rgb", "20 83 45"),
            ("--border-primary-rgb", "22 101 52"),
            ("--background-primary-rgb", "26 46 5"),
        ],
    },
    Theme {
        id: "classic-light",
        name: "Classic",
        icon_gradient: ("#a5b4fc", "#6366f1"),
        colors: &[
            ("--background-primary", "#f1f5f9"),
            ("--text-primary", "#0f172a"),
            ("--text-secondary", "#475569"),
            ("--accent-primary", "#4f46e5"),
            ("--accent-ring", "#6366f1"),
            ("--accent-focus", "#4338ca"),
            ("--accent-button-text", "#ffffff"),
            ("--accent-gradient-from", "#a5b4fc"),
            ("--accent-gradient-to", "#6366f1"),
            ("--error", "#ef4444"),
            ("--background-secondary-rgb", "226 232 240"),
            ("--background-tertiary-rgb", "203 213 225"),
            ("--background-hover-rgb", "148 163 184"),
            ("--accent-bg-hover-rgb", "79 70 229"),
            ("--accent-active-bg-rgb", "224 231 255"),
            ("--border-primary-rgb", "203 213 225"),
            ("--background-primary-rgb", "241 245 249"),
        ],
    },
    Theme {
        id: "sakura-light",
        name: "Sakura",
        icon_gradient: ("#f9a8d4", "#ec4899"),
        colors: &[
            ("--background-primary", "#fff1f2"),
            ("--text-primary", "#831843"),
            ("--text-secondary", "#be185d"),
            ("--accent-primary", "#ec4899"),
            ("--accent-ring", "#f472b6"),
            ("--accent-focus", "#db2777"),
            ("--accent-button-text", "#ffffff"),
            ("--accent-gradient-from", "#f9a8d4"),
            ("--accent-gradient-to", "#ec4899"),
            ("--error", "#e11d48"),
            ("--background-secondary-rgb", "253 232 248"),
            ("--background-tertiary-rgb", "252 211 240"),
            ("--background-hover-rgb", "251 182 225"),
            ("--accent-bg-hover-rgb", "219 39 119"),
            ("--accent-active-bg-rgb", "253 242 248"),
            ("--border-primary-rgb", "251 182 225"),
            ("--background-primary-rgb", "255 241 242"),
        ],
    },
];
