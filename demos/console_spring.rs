use phys_oscillator::{
    math::Vector2, scene::Scene, OscillatorConfig, SimulationConfig, SpringBlockOscillator,
};
use std::thread::sleep;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const WIDTH: usize = 72;
const HEIGHT: usize = 9;

// World window shown on screen
const MIN_X: f32 = -4.5;
const MAX_X: f32 = 0.5;
const MIN_Y: f32 = -1.0;
const MAX_Y: f32 = 1.0;

fn to_cell(p: Vector2) -> Option<(usize, usize)> {
    let col = ((p.x - MIN_X) / (MAX_X - MIN_X) * (WIDTH - 1) as f32).round();
    let row = ((MAX_Y - p.y) / (MAX_Y - MIN_Y) * (HEIGHT - 1) as f32).round();
    if col < 0.0 || row < 0.0 || col as usize >= WIDTH || row as usize >= HEIGHT {
        return None;
    }
    Some((row as usize, col as usize))
}

fn plot(grid: &mut [Vec<char>], p: Vector2, c: char) {
    if let Some((row, col)) = to_cell(p) {
        grid[row][col] = c;
    }
}

fn draw(scene: &Scene, osc: &SpringBlockOscillator) -> phys_oscillator::Result<()> {
    let mut grid = vec![vec![' '; WIDTH]; HEIGHT];

    // Spring, drawn smoothly through its samples
    for segment in scene.shape(osc.spring_shape())?.cubic_segments() {
        for i in 0..=4 {
            plot(&mut grid, segment.point_at(i as f32 / 4.0), '~');
        }
    }

    let wall = scene.shape(osc.anchor_shape())?;
    for i in 0..=8 {
        plot(&mut grid, wall.point_from_proportion(i as f32 / 8.0), '|');
    }

    let block = scene.shape(osc.block_shape())?;
    for i in 0..=24 {
        plot(&mut grid, block.point_from_proportion(i as f32 / 24.0), '#');
    }

    print!("\x1B[2J\x1B[1;1H");
    for row in &grid {
        let line: String = row.iter().collect();
        println!("{}", line);
    }
    Ok(())
}

fn main() -> phys_oscillator::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Gravity would pull the block off the spring axis
    let mut scene = Scene::new(SimulationConfig::weightless());
    let mut osc = SpringBlockOscillator::new(&mut scene, OscillatorConfig::default())?;
    osc.attach(&mut scene)?;
    osc.start(&mut scene, 0.8, 0.0)?;

    let total_frames = 360; // 12 seconds at 30 FPS
    let frame_time = 1.0 / 30.0;

    for frame in 0..total_frames {
        match frame {
            180 => {
                osc.stop(&mut scene)?;
            }
            240 => {
                osc.start(&mut scene, 0.0, -2.0)?;
            }
            _ => {}
        }

        scene.advance(frame_time)?;
        draw(&scene, &osc)?;

        if let Some(body) = osc.block_body(&scene) {
            let rb = scene.world().get_body(body)?;
            println!(
                "frame {:3}  {:?}  x={:.2}  v={:.2}{}",
                frame,
                osc.state(&scene),
                rb.get_position().x,
                rb.get_linear_velocity().x,
                if rb.is_sleeping() { "  (asleep)" } else { "" }
            );
        }

        sleep(Duration::from_millis((frame_time * 1000.0) as u64));
    }

    Ok(())
}
