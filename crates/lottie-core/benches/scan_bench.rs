use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lottie_core::{replace_color, scan_colors};
use lottie_data::model::Rgba;
use serde_json::{json, Value};

fn build_lottie(layer_count: usize) -> Value {
    let mut layers = vec![json!({
        "ty": 3,
        "nm": "settings",
        "ef": [{ "nm": "Fill 1", "ef": [{ "nm": "Color", "v": { "k": [0.2, 0.4, 0.6, 1] } }] }]
    })];
    for i in 0..layer_count {
        layers.push(json!({
            "ty": 4,
            "ind": i + 2,
            "nm": format!("Layer {i}"),
            "shapes": [
                { "ty": "gr", "it": [
                    { "ty": "sh", "nm": "Path" },
                    { "ty": "fl", "nm": "Fill", "c": { "k": [1, 0, 0, 1] } },
                    { "ty": "st", "nm": "Stroke", "c": { "k": [0, 0, 255, 1] } }
                ] },
                { "ty": "fl", "nm": "Linked", "c": {
                    "k": [0, 0, 0, 1],
                    "x": "var $bm_rt;\n$bm_rt = thisComp.layer('settings').effect('Fill 1')('Color');"
                } }
            ]
        }));
    }
    json!({ "layers": layers, "assets": [] })
}

fn bench_scan(c: &mut Criterion) {
    let lottie = build_lottie(200);
    c.bench_function("scan_colors_200_layers", |b| {
        b.iter(|| scan_colors(black_box(&lottie)))
    });
}

fn bench_replace(c: &mut Criterion) {
    let lottie = build_lottie(200);
    let rgba = Rgba::new(10.0, 20.0, 30.0, 1.0);
    c.bench_function("replace_color_200_layers", |b| {
        b.iter(|| replace_color(rgba, black_box("layers.100.shapes.0.it.1"), &lottie))
    });
}

criterion_group!(benches, bench_scan, bench_replace);
criterion_main!(benches);
