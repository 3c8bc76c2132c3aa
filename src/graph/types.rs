//! Core types for the component graph.
//!
//! Defines component classification, registry entries, and the node and
//! edge records handed to the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two observable capabilities of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Imports something from the actions directory.
    pub dispatches_actions: bool,
    /// Imports something from the stores directory.
    pub connects_to_store: bool,
}

impl Classification {
    pub fn new(dispatches_actions: bool, connects_to_store: bool) -> Self {
        Self {
            dispatches_actions,
            connects_to_store,
        }
    }

    /// The role this classification falls into.
    pub fn role(&self) -> Role {
        match (self.dispatches_actions, self.connects_to_store) {
            (true, true) => Role::StoreAndActions,
            (true, false) => Role::Actions,
            (false, true) => Role::Store,
            (false, false) => Role::Pure,
        }
    }

    pub fn color(&self) -> Color {
        self.role().color()
    }
}

/// Behavioral role of a component, one per classification combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    StoreAndActions,
    Store,
    Actions,
    Pure,
}

impl Role {
    /// All roles, in legend order.
    pub const ALL: [Role; 4] = [Role::StoreAndActions, Role::Store, Role::Actions, Role::Pure];

    pub fn color(&self) -> Color {
        match self {
            Role::StoreAndActions => Color::Brown,
            Role::Store => Color::Red,
            Role::Actions => Color::Orange,
            Role::Pure => Color::Blue,
        }
    }

    /// Label used for the legend node.
    pub fn label(&self) -> &'static str {
        match self {
            Role::StoreAndActions => "Store and Actions",
            Role::Store => "Store",
            Role::Actions => "Actions",
            Role::Pure => "Pure",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Node fill colors. Serialized as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "#54301a")]
    Brown,
    #[serde(rename = "#f37321")]
    Orange,
    #[serde(rename = "#ee3524")]
    Red,
    #[serde(rename = "#10a6df")]
    Blue,
}

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Brown => "#54301a",
            Color::Orange => "#f37321",
            Color::Red => "#ee3524",
            Color::Blue => "#10a6df",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Node shape override. Only legend entries carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Box,
}

/// Registry entry for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub classification: Classification,
    /// Identities of direct component dependencies, in dependency order.
    pub children: Vec<String>,
}

/// A node of the rendered graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub label: String,
    pub color: Color,
    /// `0` for components, `1` for legend entries.
    pub group: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

impl Node {
    pub fn is_legend(&self) -> bool {
        self.group == LEGEND_GROUP
    }
}

pub const COMPONENT_GROUP: u8 = 0;
pub const LEGEND_GROUP: u8 = 1;

/// A directed parent -> child edge between node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}
