use std::time::Instant;
use waynav::{EdgeKind, Waypoint, WaypointGraph};

fn build_grid_graph(side: usize) -> WaypointGraph {
    let mut g = WaypointGraph::new();
    // Ids are row-major grid indices; neighbours joined horizontally and vertically
    for j in 0..side { for i in 0..side { g.add_waypoint(Waypoint::new((j*side+i) as i64, "Grid", &format!("{},{}", i, j), i as f64 * 16.0, j as f64 * 12.0)); } }
    for j in 0..side {
        for i in 0..side {
            let id = (j*side+i) as i64;
            if i+1 < side { let _ = g.add_edge(id, id+1, EdgeKind::Vehicle); }
            if j+1 < side { let _ = g.add_edge(id, id+side as i64, EdgeKind::Walkable); }
        }
    }
    g
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut side = 40usize;
    let mut routes = 200usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--side=") { if let Ok(v)=val.parse() { side=v; } }
        else if let Some(val)=a.strip_prefix("--routes=") { if let Ok(v)=val.parse() { routes=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }
    if side < 2 { eprintln!("--side must be at least 2"); std::process::exit(2); }

    let g = build_grid_graph(side);
    let n = (side*side) as i64;

    let mut times_ms: Vec<f64> = Vec::with_capacity(routes);
    let start_all = Instant::now();
    let mut found = 0usize;
    for k in 0..routes {
        // Corner-to-corner plus a walk of pseudo-random pairs
        let a = ((k as i64) * 7919) % n;
        let b = n - 1 - ((k as i64) * 104729) % n;
        let t0 = Instant::now();
        match g.find_path(a, b) {
            Ok(Some(_)) => found += 1,
            Ok(None) => {}
            Err(e) => { eprintln!("route {} -> {} failed: {}", a, b, e); std::process::exit(1); }
        }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("waypoints={} lines={} routes={} found={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}", g.waypoint_count(), g.line_count(), routes, found, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
