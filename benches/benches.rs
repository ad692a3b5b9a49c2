use criterion::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use yfc::*;
use yuv_frame_convert as yfc;

const SAMPLE_SIZE: usize = 22;

// 1080p and a 12 MP sensor
const SIZES: &[(usize, usize)] = &[(1920, 1080), (4032, 3024)];

struct Nv21Frame {
    width: usize,
    height: usize,
    y: Vec<u8>,
    vu: Vec<u8>,
}

impl Nv21Frame {
    fn random(width: usize, height: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(0x601);
        let y = (0..width * height).map(|_| rng.gen()).collect();
        let vu = (0..width * height / 2).map(|_| rng.gen()).collect();

        Nv21Frame {
            width,
            height,
            y,
            vu,
        }
    }

    fn host_frame(&self) -> HostFrame<'_> {
        let width = self.width as i32;

        HostFrame {
            width,
            height: self.height as i32,
            format_code: YUV_420_888,
            planes: [
                SourcePlane {
                    data: &self.y,
                    pixel_stride: 1,
                    row_stride: width,
                },
                SourcePlane {
                    data: &self.vu[1..],
                    pixel_stride: 2,
                    row_stride: width,
                },
                SourcePlane {
                    data: &self.vu,
                    pixel_stride: 2,
                    row_stride: width,
                },
            ],
        }
    }
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("yfc");
    group.sample_size(SAMPLE_SIZE);

    for &(width, height) in SIZES {
        let input = Nv21Frame::random(width, height);
        let source = input.host_frame();
        let frame = FrameDescriptor::from_source(&source).expect("Malformed benchmark frame");
        let mut output = vec![0u8; get_output_size(width as i32, height as i32).unwrap()];

        group.throughput(Throughput::Elements((width as u64) * (height as u64)));
        for (label, workers) in [("sequential", 1), ("parallel", WORKERS_AUTO)] {
            let options = ConvertOptions {
                workers,
                ..ConvertOptions::default()
            };

            group.bench_function(format!("nv21>rgba/{width}x{height}/{label}"), |b| {
                b.iter(|| {
                    convert_frame_into(&frame, &options, black_box(&mut output))
                        .expect("Benchmark iteration failed");
                });
            });
        }

        group.bench_function(format!("nv21>rgba/{width}x{height}/allocating"), |b| {
            b.iter(|| convert(black_box(&source)).expect("Benchmark iteration failed"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
