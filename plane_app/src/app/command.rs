//! Parsing of stdin commands

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Error, Result};
use cutplane_lib::{color, color::RGB, common::HalfSpace, editor::Slider};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Slider(Slider, f32),
    Side(HalfSpace),
    Color(RGB),
    Indicator(bool),
    Load(String),
    Iso { value: f32, opacity: f32 },
    SaveLayer(RGB),
    DeleteLayer,
    Layers,
    Flush,
    Reset,
    Help,
    Quit,
}

fn number(arg: Option<&str>, what: &str) -> Result<f32> {
    let raw = arg.ok_or_else(|| anyhow!("missing {what}"))?;
    let val: f32 = raw
        .parse()
        .with_context(|| format!("{what} is not a number: {raw}"))?;
    if !val.is_finite() {
        bail!("{what} must be finite");
    }
    Ok(val)
}

fn hex(arg: Option<&str>) -> Result<RGB> {
    let raw = arg.ok_or_else(|| anyhow!("missing color"))?;
    Ok(color::parse_hex(raw)?)
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let arg = words.next();

        let cmd = match name {
            "x" => Command::Slider(Slider::X, number(arg, "slider value")?),
            "y" => Command::Slider(Slider::Y, number(arg, "slider value")?),
            "t" => Command::Slider(Slider::Translate, number(arg, "translation")?),
            "side" => match arg {
                Some("above") => Command::Side(HalfSpace::Above),
                Some("below") => Command::Side(HalfSpace::Below),
                _ => bail!("side is above or below"),
            },
            "color" => Command::Color(hex(arg)?),
            "indicator" => match arg {
                Some("on") => Command::Indicator(true),
                Some("off") => Command::Indicator(false),
                _ => bail!("indicator is on or off"),
            },
            "load" => Command::Load(arg.ok_or_else(|| anyhow!("missing path"))?.to_owned()),
            "iso" => Command::Iso {
                value: number(arg, "iso value")?,
                opacity: number(words.next(), "opacity")?,
            },
            "save" => Command::SaveLayer(hex(arg)?),
            "delete" => Command::DeleteLayer,
            "layers" => Command::Layers,
            "flush" => Command::Flush,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command {other}, try help"),
        };
        Ok(cmd)
    }
}
