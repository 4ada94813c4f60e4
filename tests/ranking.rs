use anyhow::Result;
use firstrank::*;
use std::cmp::Ordering;

#[test]
fn natural_and_reversed() -> Result<()> {
    let r = Ranking::<i32>::natural();
    assert_eq!(r.compare(&1, &2)?, Ordering::Less);
    assert_eq!(r.clone().reversed().compare(&1, &2)?, Ordering::Greater);
    assert_eq!(r.compare(&2, &2)?, Ordering::Equal);
    Ok(())
}

#[test]
fn then_breaks_ties() -> Result<()> {
    let r = Ranking::by_key(|s: &String| s.len()).then(Ranking::natural());
    assert_eq!(r.compare(&"bb".to_string(), &"aa".to_string())?, Ordering::Greater);
    assert_eq!(r.compare(&"z".to_string(), &"aa".to_string())?, Ordering::Less);
    Ok(())
}

#[test]
fn then_stops_at_first_difference() -> Result<()> {
    let r = Ranking::<i32>::natural().then(Ranking::try_by(|_: &i32, _: &i32| anyhow::bail!("never reached")));
    assert_eq!(r.compare(&1, &2)?, Ordering::Less);
    assert!(r.compare(&1, &1).is_err());
    Ok(())
}

#[test]
fn partial_order_rejects_nan() -> Result<()> {
    let r = Ranking::<f64>::partial();
    assert_eq!(r.compare(&1.0, &2.0)?, Ordering::Less);
    let err = r.compare(&f64::NAN, &1.0).expect_err("NaN is incomparable");
    assert!(err.to_string().contains("incomparable"));
    Ok(())
}

#[test]
fn partial_order_failure_reaches_collector_caller() {
    let collector = FirstRank::compare_by(Ranking::<f64>::partial());
    let res = vec![1.0, f64::NAN, 0.5].into_iter().first_rank(&collector);
    assert!(res.is_err());
}

#[test]
fn total_f64_ranks_nan_last() -> Result<()> {
    let collector = FirstRank::compare_by(Ranking::total_f64());
    let out = vec![f64::NAN, 2.5, -1.0, -1.0].into_iter().first_rank(&collector)?;
    assert_eq!(out, vec![-1.0, -1.0]);

    let max = Direction::Max.compare_by(Ranking::total_f64());
    let out = vec![2.5, f64::NAN, 1.0].into_iter().first_rank(&max)?;
    assert_eq!(out.len(), 1);
    assert!(out[0].is_nan());
    Ok(())
}

#[test]
fn nulls_first_and_last() -> Result<()> {
    let first = Ranking::nulls_first(Ranking::<i32>::natural());
    assert_eq!(first.compare(&None, &Some(1))?, Ordering::Less);
    assert_eq!(first.compare(&None, &None)?, Ordering::Equal);
    assert_eq!(first.compare(&Some(2), &Some(1))?, Ordering::Greater);

    let last = Ranking::nulls_last(Ranking::<i32>::natural());
    assert_eq!(last.compare(&None, &Some(1))?, Ordering::Greater);
    assert_eq!(last.compare(&Some(1), &None)?, Ordering::Less);
    Ok(())
}

#[test]
fn non_null_rejects_only_missing_keys() -> Result<()> {
    let r = Ranking::non_null(Ranking::<i32>::natural());
    assert_eq!(r.compare(&Some(1), &Some(1))?, Ordering::Equal);
    assert!(r.compare(&Some(1), &None).is_err());
    assert!(r.compare(&None, &None).is_err());
    Ok(())
}

#[test]
fn natural_option_order_puts_none_first() -> Result<()> {
    let out = vec![Some(3), None, Some(1), None]
        .into_iter()
        .first_rank(&FirstRank::natural())?;
    assert_eq!(out, vec![None, None]);
    Ok(())
}

#[test]
fn direction_apply() -> Result<()> {
    let min = Direction::Min.apply(Ranking::<u8>::natural());
    let max = Direction::Max.apply(Ranking::<u8>::natural());
    assert_eq!(min.compare(&1, &2)?, Ordering::Less);
    assert_eq!(max.compare(&1, &2)?, Ordering::Greater);
    assert_eq!(Direction::default(), Direction::Min);
    assert_eq!(Direction::Max.to_string(), "max");
    Ok(())
}

#[test]
fn custom_infallible_rule() -> Result<()> {
    // Case-insensitive ranking.
    let r = Ranking::by(|a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase()));
    let out = vec!["b".to_string(), "A".to_string(), "a".to_string()]
        .into_iter()
        .first_rank(&FirstRank::compare_by(r))?;
    assert_eq!(out, vec!["A".to_string(), "a".to_string()]);
    Ok(())
}

#[test]
fn total_f64_ties_signed_zeros() -> Result<()> {
    let r = Ranking::total_f64();
    assert_eq!(r.compare(&-0.0, &0.0)?, std::cmp::Ordering::Equal);
    assert_eq!(r.compare(&f64::NAN, &-f64::NAN)?, std::cmp::Ordering::Equal);
    let out = vec![0.0, -0.0, 1.0].into_iter().first_rank(&FirstRank::compare_by(r))?;
    assert_eq!(out.len(), 2);
    assert!(out[0].is_sign_positive() && out[1].is_sign_negative());
    Ok(())
}
