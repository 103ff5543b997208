// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! jumpbox: a modal terminal editor for box-and-arrow and sequence diagrams.
//!
//! Nodes and connections are picked with single-key jump labels instead of a cursor. The
//! [`editor::Editor`] is a pure state machine over [`model::Diagram`]; [`tui`] is the thin
//! terminal shell around it.

pub mod bridge;
pub mod config;
pub mod editor;
pub mod format;
pub mod history;
pub mod model;
pub mod store;
pub mod tui;
pub mod view;
