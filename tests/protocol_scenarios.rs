//! End-to-end BB84 scenarios.
//!
//! Statistical checks average over many seeded runs instead of asserting on
//! a single outcome.

use bb84_sim::{
    Basis, Decision, QberEstimate, RandomSource, RunConfig, Sampler, Scenario, SiftedBit,
    SiftedKey, bb84, derive_key,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Randomness with every basis pinned to rectilinear.
struct AlignedBases(StdRng);

impl RandomSource for AlignedBases {
    fn bit(&mut self) -> bool {
        self.0.bit()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.0.chance(p)
    }

    fn choose_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        self.0.choose_distinct(length, amount)
    }

    fn basis(&mut self) -> Basis {
        Basis::Rectilinear
    }
}

/// Randomness where Alice and Bob never agree on a basis.
struct OpposedBases {
    inner: StdRng,
    next_diagonal: bool,
    photons: usize,
    drawn: usize,
}

impl RandomSource for OpposedBases {
    fn bit(&mut self) -> bool {
        self.inner.bit()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.inner.chance(p)
    }

    fn choose_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        self.inner.choose_distinct(length, amount)
    }

    // Alice's N draws come first, then Bob's N: give Alice `+`, Bob `×`.
    fn basis(&mut self) -> Basis {
        self.drawn += 1;
        if self.drawn > self.photons {
            self.next_diagonal = true;
        }
        if self.next_diagonal {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }
}

#[test]
fn clean_link_with_aligned_bases_accepts_at_any_threshold() {
    let config = RunConfig::new(10)
        .without_eve()
        .with_noise(0.0)
        .with_qber_threshold(0.0);
    let mut rng = AlignedBases(StdRng::seed_from_u64(1));

    let run = bb84::run(&config, &mut rng).unwrap();

    assert_eq!(run.result.sifted_count, 10);
    assert_eq!(run.result.qber, 0.0);
    assert_eq!(run.result.decision, Decision::Accept);
    assert_eq!(run.result.revealed_indices.len(), 2);
    assert_eq!(run.result.final_key.len(), 8);
    assert_eq!(run.photons.bob_results, run.photons.alice_bits);
}

#[test]
fn no_basis_matches_is_a_degenerate_accept() {
    let config = RunConfig::new(12).with_noise(0.3).with_qber_threshold(0.0);
    let mut rng = OpposedBases {
        inner: StdRng::seed_from_u64(2),
        next_diagonal: false,
        photons: 12,
        drawn: 0,
    };

    let run = bb84::run(&config, &mut rng).unwrap();

    assert!(run.result.is_degenerate());
    assert_eq!(run.result.sifted_count, 0);
    assert!(run.result.revealed_indices.is_empty());
    assert_eq!(run.result.qber, 0.0);
    assert!(run.result.final_key.is_empty());
    assert_eq!(run.result.decision, Decision::Accept);
    assert_eq!(run.result.key_yield(), 0.0);
}

#[test]
fn worked_example_from_four_sifted_bits() {
    let alice = [true, false, true, true];
    let bob = [true, true, true, false];
    let sifted: SiftedKey = alice
        .iter()
        .zip(&bob)
        .enumerate()
        .map(|(index, (&alice, &bob))| SiftedBit { index, alice, bob })
        .collect();

    let estimate = QberEstimate::from_revealed(&sifted, vec![1, 3]);
    let key = derive_key(&sifted, &estimate.revealed);

    // local 1 (0 vs 1) and local 3 (1 vs 0) both disagree
    assert_eq!(estimate.errors, 2);
    assert_eq!(estimate.qber, 1.0);
    assert_eq!(key, vec![true, true]);

    // a sample with one of the two mismatches
    let estimate = QberEstimate::from_revealed(&sifted, vec![0, 3]);
    assert_eq!(estimate.qber, 0.5);
    assert_eq!(derive_key(&sifted, &estimate.revealed), vec![false, true]);
}

#[test]
fn heavy_noise_drives_qber_towards_half() {
    let config = RunConfig::new(100)
        .without_eve()
        .with_noise(0.5)
        .with_reveal_fraction(1.0);
    let mut rng = StdRng::seed_from_u64(100);

    let summary = Sampler::new(config).run(200, &mut rng).unwrap();

    assert!(
        (0.4..=0.6).contains(&summary.mean_qber),
        "mean qber {}",
        summary.mean_qber
    );
}

#[test]
fn qber_grows_with_noise() {
    let mut rng = StdRng::seed_from_u64(7);
    let means: Vec<f64> = [0.0, 0.05, 0.15, 0.3]
        .into_iter()
        .map(|noise| {
            let config = RunConfig::new(200)
                .without_eve()
                .with_noise(noise)
                .with_reveal_fraction(0.5);
            Sampler::new(config).run(100, &mut rng).unwrap().mean_qber
        })
        .collect();

    assert_eq!(means[0], 0.0);
    assert!(means.windows(2).all(|w| w[0] < w[1]), "means {means:?}");
}

#[test]
fn full_interception_induces_quarter_error_rate() {
    let config = RunConfig::new(400)
        .with_eve(1.0)
        .with_noise(0.0)
        .with_reveal_fraction(1.0);
    let mut rng = StdRng::seed_from_u64(84);

    let summary = Sampler::new(config).run(100, &mut rng).unwrap();

    assert!(
        (0.22..=0.28).contains(&summary.mean_qber),
        "mean qber {}",
        summary.mean_qber
    );
    assert_eq!(summary.accepted, 0);
}

#[test]
fn bank_link_is_usually_accepted_and_adversarial_usually_aborted() {
    let mut rng = StdRng::seed_from_u64(2025);
    let base = RunConfig::new(512).with_qber_threshold(11.0);

    let bank = Sampler::new(Scenario::Bank.apply(base.clone()))
        .run(50, &mut rng)
        .unwrap();
    let adversarial = Sampler::new(Scenario::Adversarial.apply(base))
        .run(50, &mut rng)
        .unwrap();

    assert!(bank.acceptance_rate() > 0.9, "{bank:?}");
    assert!(adversarial.mean_qber > bank.mean_qber);
}

#[test]
fn run_with_entropy_produces_consistent_result() {
    let run = bb84::run_with_entropy(&Scenario::SmartGrid.config()).unwrap();
    let r = &run.result;
    assert_eq!(r.final_key.len(), r.sifted_count - r.revealed_indices.len());
    assert!((0.0..=1.0).contains(&r.qber));
}
