//! Demonstration harness: transform the sequence `1..=N` for a few small
//! sizes and print each buffer before and after every call.

use cachedfft::FftEngine;

fn generate_signal(n: usize) -> (Vec<f64>, Vec<f64>) {
    let reals = (1..=n).map(|i| i as f64).collect();
    let imags = vec![0.0; n];
    (reals, imags)
}

fn print_signal(label: &str, reals: &[f64], imags: &[f64]) {
    let formatted: Vec<String> = reals
        .iter()
        .zip(imags.iter())
        .map(|(re, im)| format!("{re:.3}{im:+.3}im"))
        .collect();
    println!("    {label} {}", formatted.join(", "));
}

fn main() {
    let mut engine = FftEngine::<f64>::new();

    for k in 1..=3 {
        let len = 1usize << k;
        engine.ensure_tables(k);

        println!("k={k};  len={len};");

        let (mut reals, mut imags) = generate_signal(len);
        println!("fft_forward(1..={len}):");
        print_signal("in: ", &reals, &imags);
        engine.fft_forward(&mut reals, &mut imags, k);
        print_signal("out:", &reals, &imags);

        println!("fft_inverse(fft_forward(1..={len})):");
        print_signal("in: ", &reals, &imags);
        engine.fft_inverse(&mut reals, &mut imags, k);
        print_signal("out:", &reals, &imags);

        let (mut reals, mut imags) = generate_signal(len);
        println!("fft_inverse(1..={len}):");
        print_signal("in: ", &reals, &imags);
        engine.fft_inverse(&mut reals, &mut imags, k);
        print_signal("out:", &reals, &imags);

        println!();
    }
}
