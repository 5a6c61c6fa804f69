//! Input scripts for headless runs.
//!
//! A script is a comma-separated list of steps, each one frame of input,
//! optionally repeated with `*N`:
//!
//! - `w` `a` `s` `d`: forward, left, back, right (combine freely: `wd`)
//! - `e` / `q`: up / down
//! - `x`: exit key
//! - `.`: no input
//! - `m<dx>/<dy>`: mouse motion in pixels, e.g. `m20/-4`
//!
//! Example: `w*30,m20/0,wd*10,x`.

use anyhow::{Context, Result, bail};
use freelook_input::{InputFrame, Key};

pub fn parse(script: &str) -> Result<Vec<InputFrame>> {
    let mut frames = Vec::new();
    for raw in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (body, count) = match raw.split_once('*') {
            Some((body, n)) => (
                body,
                n.parse::<usize>()
                    .with_context(|| format!("bad repeat count in step `{raw}`"))?,
            ),
            None => (raw, 1),
        };
        let frame = parse_step(body).with_context(|| format!("bad step `{raw}`"))?;
        frames.extend(std::iter::repeat_n(frame, count));
    }
    Ok(frames)
}

fn parse_step(body: &str) -> Result<InputFrame> {
    if let Some(motion) = body.strip_prefix('m') {
        let (dx, dy) = motion
            .split_once('/')
            .context("mouse motion must look like m<dx>/<dy>")?;
        return Ok(InputFrame::new().with_mouse(dx.parse()?, dy.parse()?));
    }
    if body == "." {
        return Ok(InputFrame::new());
    }

    let mut frame = InputFrame::new();
    for c in body.chars() {
        let key = match c {
            'w' => Key::Forward,
            's' => Key::Back,
            'a' => Key::Left,
            'd' => Key::Right,
            'e' => Key::Up,
            'q' => Key::Down,
            'x' => Key::Exit,
            other => bail!("unknown key `{other}`"),
        };
        frame = frame.with_key(key);
    }
    Ok(frame)
}
