/// Data layer: core types, loading, projection, and archive output.
///
/// Architecture:
/// ```text
///   table.csv        anchors.txt     constraints.csv
///      │                  │                │
///      ▼                  ▼                ▼
///   ┌────────┐       ┌─────────┐      ┌─────────┐
///   │ loader │       │ loader  │      │ loader  │
///   └────────┘       └─────────┘      └─────────┘
///      │                  │                │
///      ▼                  │                │
///   ┌─────────┐           │                │
///   │ project │  X, S     │ anchors        │ (m,4)
///   └─────────┘           │                │
///      └────────────┬─────┴────────────────┘
///                   ▼
///              ┌────────┐
///              │ Bundle │  → writer → out.npz
///              └────────┘
/// ```
pub mod loader;
pub mod model;
pub mod project;
pub mod writer;
