use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use cutplane_lib::{
    editor::{CuttingPlaneEditor, EditorEvent, EditorFront, EditorMessage},
    transfer::IsoLayers,
    volumetric,
};
use tracing::info;

use super::{defaults, output, Command, Config};

/// Whether the main loop keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Application state
pub struct State {
    front: EditorFront,
    layers: IsoLayers,
}

impl State {
    /// Start editor thread configured by `cfg`
    pub fn new(cfg: &Config) -> State {
        let mut front = EditorFront::new(CuttingPlaneEditor::new(cfg.settings.clone()));
        front.start();
        State {
            front,
            layers: IsoLayers::new(),
        }
    }

    pub fn get_event_receiver(&self) -> Receiver<EditorEvent> {
        self.front.get_receiver()
    }

    pub fn load_volume(&mut self, path: &Path) -> Result<()> {
        let grid = volumetric::load_dat(path)
            .with_context(|| format!("cannot load volume {}", path.display()))?;
        info!(path = %path.display(), "Volume ready");
        self.front
            .send_message(EditorMessage::SetVolume(Arc::new(grid)));
        Ok(())
    }

    pub fn handle_command(&mut self, cmd: Command) -> Result<Flow> {
        match cmd {
            Command::Slider(slider, value) => {
                self.front.send_message(EditorMessage::Slider(slider, value))
            }
            Command::Side(side) => self.front.send_message(EditorMessage::SetHalfSpace(side)),
            Command::Color(color) => self.front.send_message(EditorMessage::SetColor(color)),
            Command::Indicator(visible) => {
                self.front.send_message(EditorMessage::ShowIndicator(visible))
            }
            Command::Load(path) => self.load_volume(Path::new(&path))?,
            Command::Iso { value, opacity } => {
                self.layers.move_cursor(value, opacity);
                println!("{}", output::format_layers(&self.layers));
            }
            Command::SaveLayer(color) => {
                self.layers.save_layer(color)?;
                println!("{}", output::format_layers(&self.layers));
            }
            Command::DeleteLayer => {
                self.layers.delete_layer()?;
                println!("{}", output::format_layers(&self.layers));
            }
            Command::Layers => println!("{}", output::format_layers(&self.layers)),
            Command::Flush => self.flush(),
            Command::Reset => self.front.send_message(EditorMessage::Reset),
            Command::Help => println!("{}", defaults::PROMPT_HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn layers(&self) -> &IsoLayers {
        &self.layers
    }

    /// Apply debounced changes now
    pub fn flush(&self) {
        self.front.send_message(EditorMessage::Flush);
    }

    pub fn shutdown(&mut self) {
        self.front.finish();
    }
}
