//! # Nova GUI Bridge
//!
//! Connects a managed GUI to a native renderer across a C boundary.
//!
//! ## Features
//!
//! - **Texture Batching**: Draw calls merge into one geometry batch per texture
//! - **Command Marshalling**: One buffer command per texture, in C layout
//! - **Change-Driven Frames**: Geometry is rebuilt and sent only when the screen changes
//! - **Input Translation**: Native event queues become polled mouse and keyboard state
//! - **Dynamic Loading**: The renderer is a shared library resolved at startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nova_gui::prelude::*;
//!
//! struct TitleScreen {
//!     drawn: bool,
//! }
//!
//! impl GuiScreen for TitleScreen {
//!     fn check_state_changed(&mut self, _pointer: PointerPosition) -> bool {
//!         !std::mem::replace(&mut self.drawn, true)
//!     }
//!
//!     fn draw(&mut self, batches: &mut BatchRegistry, _pointer: PointerPosition) -> BridgeResult<()> {
//!         let widgets = TextureId::new("minecraft", "textures/gui/widgets.png");
//!         batches.draw_textured_rect(&widgets, 100, 60, 0, 66, 200, 20)
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BridgeConfig::default();
//!     let mut renderer = NativeLibrary::load(&config.native)?;
//!     renderer.initialize();
//!
//!     let mut driver = FrameDriver::with_config(&config.gui);
//!     let mut mouse = Mouse::new();
//!     let mut screen = TitleScreen { drawn: false };
//!     let metrics = ScreenMetrics::new(1280, 720, 640, 360);
//!
//!     while !renderer.should_close() {
//!         while mouse.poll(&mut renderer) {}
//!         driver.render_frame(&mut screen, &mouse, &metrics, &mut renderer)?;
//!         renderer.execute_frame();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::must_use_candidate
)]

// Configuration and shared types
pub mod core;
pub mod config;
pub mod error;
pub mod foundation;

// GUI pipeline
pub mod ui;
pub mod input;
pub mod native;

pub use error::{BridgeError, BridgeResult, DrawError};

/// Common imports for bridge users
pub mod prelude {
    pub use crate::{
        BridgeError, BridgeResult, DrawError,
        config::Config,
        core::{BridgeConfig, GuiConfig, InputConfig, NativeLibraryConfig},
        ui::{
            BatchRegistry, CommandRecorder, FrameDriver, FrameOutcome, FrameState,
            GuiButtonDescription, GuiCommandSink, GuiScreen, GuiScreenDescription,
            PointerPosition, ScreenMetrics, TextureId,
        },
        input::{EventQueue, InputEventSource, KeyCode, Keyboard, Modifiers, Mouse, MouseButton},
        native::NativeLibrary,
    };
}
