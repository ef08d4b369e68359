//! GUI bridge demo application
//!
//! Drives a title menu through the frame driver. With `--native` the Nova
//! renderer library is loaded and run until its window closes; otherwise a
//! scripted offline host records the commands and replays canned input.

use clap::{Arg, ArgMatches, Command};
use nova_gui::prelude::*;
use nova_gui::foundation::logging;
use nova_gui::input::{Action, KeyCharEvent, KeyPressEvent, MouseButtonEvent, MousePositionEvent};
use nova_gui::ui::GuiBufferCommand;

const WIDGETS: &str = "textures/gui/widgets.png";
const BACKGROUND: &str = "textures/gui/options_background.png";

/// Something that renders GUI commands and produces input
trait Host: GuiCommandSink + InputEventSource {
    /// Finish the frame
    fn end_frame(&mut self, frame: u64);

    /// Whether the host wants to stop
    fn should_close(&self) -> bool;
}

impl Host for NativeLibrary {
    fn end_frame(&mut self, _frame: u64) {
        self.execute_frame();
    }

    fn should_close(&self) -> bool {
        NativeLibrary::should_close(self)
    }
}

/// In-memory host feeding scripted input
struct OfflineHost {
    recorder: CommandRecorder,
    queue: EventQueue,
    metrics: ScreenMetrics,
    frames: u64,
    frame_limit: u64,
}

impl OfflineHost {
    fn new(metrics: ScreenMetrics, frame_limit: u64) -> Self {
        let mut host = Self {
            recorder: CommandRecorder::new(),
            queue: EventQueue::new(),
            metrics,
            frames: 0,
            frame_limit,
        };
        host.script(0);
        host
    }

    /// Raw position for a scaled GUI position
    fn raw_position(&self, x: i32, y: i32) -> MousePositionEvent {
        let sx = self.metrics.display_width as i32 / self.metrics.scaled_width.max(1) as i32;
        let sy = self.metrics.display_height as i32 / self.metrics.scaled_height.max(1) as i32;
        MousePositionEvent::new(x * sx, (self.metrics.scaled_height as i32 - 1 - y) * sy)
    }

    /// Queue the input scheduled for a frame
    fn script(&mut self, frame: u64) {
        let pointer_target = match frame {
            0 => Some((5, 5)),
            10 => Some((200, 70)),
            30 => Some((200, 118)),
            _ => None,
        };
        if let Some((x, y)) = pointer_target {
            let event = self.raw_position(x, y);
            self.queue.push_mouse_position(event);
        }

        match frame {
            40 => {
                self.queue
                    .push_mouse_button(MouseButtonEvent::new(0, Action::Press, Modifiers::empty()));
            }
            41 => {
                self.queue
                    .push_mouse_button(MouseButtonEvent::new(0, Action::Release, Modifiers::empty()));
            }
            50 => self.queue.push_key_char(KeyCharEvent::new('n')),
            80 => {
                self.queue.push_key_press(KeyPressEvent::new(
                    KeyCode::Escape.to_raw(),
                    1,
                    Action::Press,
                    Modifiers::empty(),
                ));
            }
            _ => {}
        }
    }
}

impl GuiCommandSink for OfflineHost {
    fn clear_gui_buffers(&mut self) {
        self.recorder.clear_gui_buffers();
    }

    fn send_gui_buffer_command(&mut self, command: &GuiBufferCommand) -> BridgeResult<()> {
        log::debug!(
            "'{}': {} indices, {} vertex scalars",
            command.texture_name(),
            command.index_buffer_size(),
            command.vertex_buffer_size()
        );
        self.recorder.send_gui_buffer_command(command)
    }

    fn send_change_gui_screen_command(&mut self, screen: &GuiScreenDescription) -> BridgeResult<()> {
        self.recorder.send_change_gui_screen_command(screen)
    }
}

impl InputEventSource for OfflineHost {
    fn next_mouse_button_event(&mut self) -> MouseButtonEvent {
        self.queue.next_mouse_button_event()
    }

    fn next_mouse_position_event(&mut self) -> MousePositionEvent {
        self.queue.next_mouse_position_event()
    }

    fn next_key_press_event(&mut self) -> KeyPressEvent {
        self.queue.next_key_press_event()
    }

    fn next_key_char_event(&mut self) -> KeyCharEvent {
        self.queue.next_key_char_event()
    }
}

impl Host for OfflineHost {
    fn end_frame(&mut self, frame: u64) {
        self.frames = frame + 1;
        self.script(self.frames);
    }

    fn should_close(&self) -> bool {
        self.frames >= self.frame_limit
    }
}

/// Title menu with hover highlighting
struct TitleMenu {
    buttons: Vec<GuiButtonDescription>,
    hovered: Option<usize>,
    pressed: Option<usize>,
    needs_redraw: bool,
    widgets: TextureId,
    background: TextureId,
}

impl TitleMenu {
    fn new(namespace: &str) -> Self {
        let labels = ["Singleplayer", "Multiplayer", "Options", "Quit Game"];
        let buttons = labels
            .iter()
            .enumerate()
            .map(|(i, label)| GuiButtonDescription::new(113, 60 + 24 * i as i32, 200, 20, *label))
            .collect();

        Self {
            buttons,
            hovered: None,
            pressed: None,
            needs_redraw: true,
            widgets: TextureId::new(namespace, WIDGETS),
            background: TextureId::new(namespace, BACKGROUND),
        }
    }

    fn description(&self) -> BridgeResult<GuiScreenDescription> {
        let buttons = self
            .buttons
            .iter()
            .enumerate()
            .map(|(i, button)| button.clone().with_pressed(self.pressed == Some(i)))
            .collect::<Vec<_>>();
        GuiScreenDescription::try_from(buttons)
    }

    /// Handle a click; returns the clicked button's label
    fn click(&mut self, pointer: PointerPosition, pressed: bool) -> Option<&str> {
        let target = self.buttons.iter().position(|b| b.enabled && b.contains(pointer));
        if pressed {
            self.pressed = target;
            self.needs_redraw = true;
            return None;
        }

        let clicked = self.pressed.take().filter(|&i| Some(i) == target);
        self.needs_redraw = true;
        clicked.map(|i| self.buttons[i].text.as_str())
    }
}

impl GuiScreen for TitleMenu {
    fn check_state_changed(&mut self, pointer: PointerPosition) -> bool {
        let hovered = self.buttons.iter().position(|b| b.contains(pointer));
        let changed = std::mem::take(&mut self.needs_redraw) || hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    fn draw(&mut self, batches: &mut BatchRegistry, _pointer: PointerPosition) -> BridgeResult<()> {
        // Background tiles are 32 scaled units
        for ty in 0..8 {
            for tx in 0..14 {
                batches.draw_rectangle(&self.background, tx * 32, ty * 32, 32, 32, 0.0, 0.0, 1.0, 1.0)?;
            }
        }

        for (i, button) in self.buttons.iter().enumerate() {
            // Sprite rows: disabled, normal, hovered
            let row = if !button.enabled {
                0
            } else if self.hovered == Some(i) {
                2
            } else {
                1
            };
            let half = button.width / 2;
            batches.draw_textured_rect(&self.widgets, button.x, button.y, 0, 46 + row * 20, half, button.height)?;
            batches.draw_textured_rect(
                &self.widgets,
                button.x + half,
                button.y,
                200 - half,
                46 + row * 20,
                half,
                button.height,
            )?;
        }
        Ok(())
    }
}

const DEFAULT_FRAMES: u64 = 120;

#[derive(Debug)]
struct Args {
    config_path: Option<String>,
    native: bool,
    frames: u64,
}

fn command() -> Command {
    Command::new("gui_demo")
        .about("Drives a sample GUI screen through the Nova GUI bridge")
        .arg(
            Arg::new("config")
                .value_name("FILE")
                .help("Bridge configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("native")
                .long("native")
                .help("Load the native renderer instead of the offline host")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .value_name("N")
                .help("Frames to run with the offline host")
                .value_parser(clap::value_parser!(u64))
                .default_value("120"),
        )
}

fn parse_args(matches: &ArgMatches) -> Args {
    Args {
        config_path: matches.get_one::<String>("config").cloned(),
        native: matches.get_flag("native"),
        frames: matches.get_one::<u64>("frames").copied().unwrap_or(DEFAULT_FRAMES),
    }
}

fn run<H: Host>(host: &mut H, config: &BridgeConfig, metrics: ScreenMetrics) -> BridgeResult<()> {
    let mut driver = FrameDriver::with_config(&config.gui);
    let mut mouse = Mouse::new();
    let mut keyboard = Keyboard::with_config(&config.input);
    let mut menu = TitleMenu::new(&config.gui.default_namespace);

    host.send_change_gui_screen_command(&menu.description()?)?;

    let mut frame = 0;
    'frames: while !host.should_close() {
        while mouse.poll(&mut *host) {
            if mouse.event_mouse_button() == Some(MouseButton::Left) {
                let pointer = metrics.pointer_position(mouse.event_x(), mouse.event_y());
                let pressed = mouse.event_button_state();
                if let Some(label) = menu.click(pointer, pressed) {
                    log::info!("Clicked '{}'", label);
                    if label == "Quit Game" {
                        break 'frames;
                    }
                }
                host.send_change_gui_screen_command(&menu.description()?)?;
            }
        }

        while keyboard.poll(&mut *host) {
            if let Some(c) = keyboard.event_character() {
                log::info!("Typed '{}'", c);
            }
            if keyboard.event_key_code() == Some(KeyCode::Escape) && keyboard.event_key_state() {
                log::info!("Escape pressed, leaving menu");
                break 'frames;
            }
        }

        match driver.render_frame(&mut menu, &mouse, &metrics, &mut *host)? {
            FrameOutcome::Unchanged => {}
            FrameOutcome::Flushed { commands } => {
                log::info!("Frame {}: sent {} GUI buffers", frame, commands);
            }
            FrameOutcome::Deferred => log::warn!("Frame {}: GUI upload deferred", frame),
        }

        host.end_frame(frame);
        frame += 1;
    }

    let stats = driver.stats();
    log::info!(
        "{} frames, {} rebuilds, {} commands, {} aborted flushes",
        stats.frames,
        stats.rebuilds,
        stats.commands_sent,
        stats.aborted_flushes
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = parse_args(&command().get_matches());
    let config = match &args.config_path {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            BridgeConfig::load_from_file(path)?
        }
        None => BridgeConfig::default(),
    };
    config.validate()?;

    let metrics = ScreenMetrics::new(854, 480, 427, 240);

    if args.native {
        let mut renderer = NativeLibrary::load(&config.native)?;
        renderer.initialize();
        run(&mut renderer, &config, metrics)?;
    } else {
        let mut host = OfflineHost::new(metrics, args.frames);
        run(&mut host, &config, metrics)?;
        log::info!(
            "Offline host received {} buffer commands across {} clears",
            host.recorder.commands().len(),
            host.recorder.clear_count()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let args = parse_args(&command().get_matches_from(["gui_demo"]));
        assert_eq!(args.config_path, None);
        assert!(!args.native);
        assert_eq!(args.frames, DEFAULT_FRAMES);
    }

    #[test]
    fn test_all_arguments() {
        let matches = command().get_matches_from(["gui_demo", "bridge.toml", "--native", "--frames", "30"]);
        let args = parse_args(&matches);
        assert_eq!(args.config_path.as_deref(), Some("bridge.toml"));
        assert!(args.native);
        assert_eq!(args.frames, 30);
    }

    #[test]
    fn test_invalid_frame_count_rejected() {
        let result = command().try_get_matches_from(["gui_demo", "--frames", "many"]);
        assert!(result.is_err());
    }
}
