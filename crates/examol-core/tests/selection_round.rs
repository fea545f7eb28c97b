use examol::io::predictions::read_predictions;
use examol::io::selections::write_selections;
use examol::select::config::{PolicyConfig, SelectionConfigBuilder};
use examol::select::observations::extract_observations;
use examol::select::policy::{Greedy, ProbabilityOfImprovement};
use examol::select::{RankingSelector, SelectionError, Selector};
use examol::store::database::MoleculeDatabase;
use examol::store::recipe::SimpleRecipe;
use ndarray::{Array, Array3, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn batch(prefix: &str, scores: &[f64]) -> (Vec<String>, Array3<f64>) {
    let keys = (0..scores.len()).map(|i| format!("{prefix}-{i}")).collect();
    let samples = Array3::from_shape_vec((1, scores.len(), 1), scores.to_vec()).unwrap();
    (keys, samples)
}

#[test]
fn bounded_retention_keeps_global_best_across_many_batches() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut selector = RankingSelector::new(25, true, Greedy);
    let mut all_scores = Vec::new();

    for b in 0..40 {
        let scores: Vec<f64> = (0..50).map(|_| rng.gen_range(-100.0..100.0)).collect();
        all_scores.extend_from_slice(&scores);
        let (keys, samples) = batch(&format!("batch{b}"), &scores);
        selector
            .add_possibilities(keys, samples.view().into_dyn())
            .unwrap();
        assert!(selector.num_retained() <= 25);
    }

    let selected: Vec<(String, f64)> = selector.dispense().collect();
    assert_eq!(selected.len(), 25);
    assert!(selected.windows(2).all(|w| w[0].1 >= w[1].1));

    all_scores.sort_by(|a, b| b.total_cmp(a));
    let expected: Vec<f64> = all_scores[..25].to_vec();
    let got: Vec<f64> = selected.iter().map(|(_, s)| *s).collect();
    assert_eq!(got, expected);
}

#[test]
fn invalid_batches_fail_without_disturbing_the_round() {
    let mut selector = RankingSelector::new(2, true, Greedy);
    let (keys, samples) = batch("ok", &[1.0, 2.0]);
    selector
        .add_possibilities(keys, samples.view().into_dyn())
        .unwrap();

    let flat = Array::<f64, _>::zeros(IxDyn(&[1, 2]));
    let deep = Array::<f64, _>::zeros(IxDyn(&[1, 2, 1, 1]));
    let two_objectives = Array3::<f64>::zeros((2, 2, 1));
    let mismatched = Array3::<f64>::zeros((1, 3, 1));
    let two_keys = || vec!["x".to_string(), "y".to_string()];

    assert_eq!(
        selector.add_possibilities(two_keys(), flat.view()),
        Err(SelectionError::Shape { ndim: 2 })
    );
    assert_eq!(
        selector.add_possibilities(two_keys(), deep.view()),
        Err(SelectionError::Shape { ndim: 4 })
    );
    assert!(
        selector
            .add_possibilities(two_keys(), two_objectives.view().into_dyn())
            .unwrap_err()
            .is_objective_count()
    );
    assert_eq!(
        selector.add_possibilities(two_keys(), mismatched.view().into_dyn()),
        Err(SelectionError::KeyCountMismatch { keys: 2, samples: 3 })
    );

    let selected: Vec<(String, f64)> = selector.dispense().collect();
    assert_eq!(
        selected,
        vec![("ok-1".to_string(), 2.0), ("ok-0".to_string(), 1.0)]
    );
}

#[test]
fn consecutive_rounds_are_isolated() {
    let mut selector = RankingSelector::new(3, true, Greedy);

    let (keys, samples) = batch("first", &[100.0, 200.0]);
    selector
        .add_possibilities(keys, samples.view().into_dyn())
        .unwrap();
    assert_eq!(selector.dispense().count(), 2);

    let (keys, samples) = batch("second", &[1.0]);
    let restarted = selector
        .add_possibilities(keys, samples.view().into_dyn())
        .unwrap();

    assert!(restarted);
    let selected: Vec<(String, f64)> = selector.dispense().collect();
    assert_eq!(selected, vec![("second-0".to_string(), 1.0)]);
}

#[test]
fn file_driven_round_with_threshold_update() {
    let database = MoleculeDatabase::from_csv_reader(
        "identifier,ip@xtb\nC,4.0\nCC,\nCCC,6.0\n".as_bytes(),
    )
    .unwrap();
    let recipes = [SimpleRecipe::new("ip", "xtb")];
    assert_eq!(extract_observations(&database, &recipes).nrows(), 2);

    let predictions = read_predictions(
        "key,m0,m1,m2,m3\nCCCC,7,7,7,5\nCCO,5,5,5,5\nCCN,6.5,5,5,5\n".as_bytes(),
    )
    .unwrap();

    let mut selector =
        RankingSelector::new(2, true, ProbabilityOfImprovement::new(0.0, 0.0));
    selector.update(&database, &recipes).unwrap();
    assert_eq!(selector.policy().threshold, 6.0);

    selector
        .add_possibilities(predictions.keys, predictions.samples.view().into_dyn())
        .unwrap();

    let mut out = Vec::new();
    let written = write_selections(&mut out, selector.dispense()).unwrap();
    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "rank,key,score\n1,CCCC,0.75\n2,CCN,0.25\n"
    );
}

#[test]
fn configured_selector_minimizes() {
    let config = SelectionConfigBuilder::new()
        .to_select(2)
        .maximize(false)
        .policy(PolicyConfig::Greedy)
        .build()
        .unwrap();
    let mut selector = RankingSelector::<String, _>::from_config(&config);

    let (keys, samples) = batch("m", &[5.0, 1.0, 9.0]);
    selector
        .add_possibilities(keys, samples.view().into_dyn())
        .unwrap();

    let order: Vec<String> = selector.dispense().map(|(k, _)| k).collect();
    assert_eq!(order, vec!["m-1", "m-0"]);
}
