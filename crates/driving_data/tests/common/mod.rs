#![allow(dead_code)]

use anyhow::Result;
use driving_data::{Camera, DrivingLog};
use driving_data::readers::DrivingLogReader;
use image::{Rgb, RgbImage};
use std::fmt::Write as _;
use tempfile::TempDir;

pub const FRAME_WIDTH: u32 = 300;
pub const FRAME_HEIGHT: u32 = 200;
pub const STEERING: [f64; 3] = [0.1, -0.2, 0.3];

/// Flat colour identifying a `(row, camera)` frame.
pub fn frame_colour(row: usize, camera: Camera) -> Rgb<u8> {
    let cam = Camera::ALL.iter().position(|&c| c == camera).unwrap();
    Rgb([40 * row as u8 + 20, 60 * cam as u8 + 30, 90])
}

/// Recovers `(row, camera)` from a frame's flat colour.
pub fn identify_frame(img: &RgbImage) -> (usize, Camera) {
    let px = img.get_pixel(img.width() / 2, img.height() / 2);
    let mut best = (0, Camera::Center, i32::MAX);
    for row in 0..STEERING.len() {
        for camera in Camera::ALL {
            let c = frame_colour(row, camera);
            let dist: i32 = (0..3).map(|i| (c[i] as i32 - px[i] as i32).abs()).sum();
            if dist < best.2 {
                best = (row, camera, dist);
            }
        }
    }
    (best.0, best.1)
}

/// A three-row driving log whose nine frames are flat-colour PNGs in a
/// temporary directory. Keep the returned `TempDir` alive while the log is used.
pub fn make_driving_log() -> Result<(TempDir, DrivingLog)> {
    let dir = TempDir::new()?;
    let mut csv = String::from("center,left,right,steering,throttle,brake,speed\n");

    for (row, steering) in STEERING.iter().enumerate() {
        let mut paths = Vec::new();
        for camera in Camera::ALL {
            let name = format!("IMG/{:?}_{}.png", camera, row).to_lowercase();
            let path = dir.path().join(&name);
            std::fs::create_dir_all(path.parent().unwrap())?;
            RgbImage::from_pixel(FRAME_WIDTH, FRAME_HEIGHT, frame_colour(row, camera)).save(&path)?;
            paths.push(name);
        }
        writeln!(
            csv,
            "{}, {}, {}, {}, 0.5, 0.0, 30.0",
            paths[0], paths[1], paths[2], steering
        )?;
    }

    let csv_path = dir.path().join("driving_log.csv");
    std::fs::write(&csv_path, csv)?;

    let log = DrivingLogReader::new(&csv_path)
        .has_headers(true)
        .read()?
        .rebase(dir.path());
    Ok((dir, log))
}
