//! Entry point for Triad3D: logging + CLI flags, then hand off to the
//! platform loop.

use anyhow::Result;
use platform::{DemoKind, RunOptions};

fn parse_backend_arg() -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    log::warn!("Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_demo_arg() -> DemoKind {
    // Accept: --demo=axes|triangles, default axes
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--demo=") {
            return match parse_demo(&val.to_ascii_lowercase()) {
                Some(kind) => kind,
                None => {
                    log::warn!("Unknown demo '{}', falling back to axes.", val);
                    DemoKind::Axes
                }
            };
        }
    }
    DemoKind::Axes
}

fn parse_demo(val: &str) -> Option<DemoKind> {
    match val {
        "axes" | "coordination" => Some(DemoKind::Axes),
        "triangles" | "instancing" => Some(DemoKind::Triangles),
        _ => None,
    }
}

fn parse_instances_arg() -> u32 {
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--instances=") {
            if let Ok(n) = val.parse::<u32>() {
                return n.max(1);
            }
            log::warn!("Invalid instance count '{}', using default.", val);
        }
    }
    64
}

fn parse_show_fps_arg() -> bool {
    // --show-fps[=on|off], default off
    for arg in std::env::args() {
        if arg == "--show-fps" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--show-fps=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_size_args() -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in std::env::args() {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(640).max(1);
    let hh = h.unwrap_or(480).max(1);
    (ww, hh)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let backends = parse_backend_arg();
    let demo = parse_demo_arg();
    let instances = parse_instances_arg();
    let show_fps = parse_show_fps_arg();
    let (width, height) = parse_size_args();
    log::info!(
        "Starting Triad3D. Demo: {:?}, backend: {:?}, instances={}, show_fps={}, window_size={}x{}",
        demo,
        backends,
        instances,
        show_fps,
        width,
        height
    );

    platform::run(RunOptions {
        backends,
        demo,
        instances,
        width,
        height,
        show_fps,
    })?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_names_resolve() {
        assert_eq!(parse_demo("axes"), Some(DemoKind::Axes));
        assert_eq!(parse_demo("coordination"), Some(DemoKind::Axes));
        assert_eq!(parse_demo("triangles"), Some(DemoKind::Triangles));
        assert_eq!(parse_demo("instancing"), Some(DemoKind::Triangles));
        assert_eq!(parse_demo("teapot"), None);
    }
}
