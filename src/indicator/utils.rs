// 일목균형표 계산에 쓰이는 시계열 공통 연산
//
// 모든 결과는 입력과 같은 길이이며, 값이 없는 위치는 `None`으로 표현합니다.

use std::collections::VecDeque;

/// 후행 롤링 윈도우의 극값 계산 (단조 덱 사용, O(n))
///
/// 인덱스 `i`의 값은 `values[i + 1 - period..=i]` 구간의 극값이며,
/// 윈도우가 다 차지 않은 처음 `period - 1`개 위치는 `None`입니다.
///
/// # Arguments
/// * `values` - 입력 값 배열
/// * `period` - 윈도우 길이
/// * `dominates` - `dominates(a, b)`가 참이면 `a`가 `b`를 대체함 (최대값이면 `a >= b`)
///
/// # Returns
/// * `Vec<Option<f64>>` - 위치별 극값
pub fn rolling_extreme(
    values: &[f64],
    period: usize,
    dominates: impl Fn(f64, f64) -> bool,
) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 {
        return result;
    }

    // 덱에는 인덱스가 오름차순으로, 값은 극값 후보 순서로 유지됨
    let mut window: VecDeque<usize> = VecDeque::with_capacity(period.min(values.len()));

    for (i, &value) in values.iter().enumerate() {
        while let Some(&back) = window.back() {
            if dominates(value, values[back]) {
                window.pop_back();
            } else {
                break;
            }
        }
        window.push_back(i);

        if let Some(&front) = window.front() {
            if i - front >= period {
                window.pop_front();
            }
        }

        if i + 1 >= period {
            result[i] = window.front().map(|&idx| values[idx]);
        }
    }

    result
}

/// 두 값의 중간값, 하나라도 없으면 `None`
pub fn midpoint(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some((a? + b?) / 2.0)
}

/// 값을 `shift`칸 앞으로(미래 방향) 옮깁니다.
///
/// `result[i] = values[i - shift]` (i >= shift), 앞쪽 `shift`칸은 `None`.
/// 배열 끝을 넘어가는 마지막 `shift`개 값은 버려집니다.
pub fn shift_forward(values: &[Option<f64>], shift: usize) -> Vec<Option<f64>> {
    let len = values.len();
    let mut result = vec![None; len];
    for i in shift..len {
        result[i] = values[i - shift];
    }
    result
}

/// 값을 `shift`칸 뒤로(과거 방향) 옮깁니다.
///
/// `result[i] = values[i + shift]` (i + shift < len), 나머지는 `None`.
pub fn shift_backward(values: &[f64], shift: usize) -> Vec<Option<f64>> {
    let len = values.len();
    let mut result = vec![None; len];
    for i in 0..len.saturating_sub(shift) {
        result[i] = Some(values[i + shift]);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_max(values: &[f64], period: usize) -> Vec<Option<f64>> {
        (0..values.len())
            .map(|i| {
                if i + 1 < period {
                    None
                } else {
                    values[i + 1 - period..=i].iter().copied().reduce(f64::max)
                }
            })
            .collect()
    }

    #[test]
    fn test_rolling_extreme_max_matches_brute_force() {
        let values = vec![5.0, 3.0, 8.0, 8.0, 1.0, 2.0, 9.0, 4.0, 4.0, 0.5, 7.0];
        for period in 1..=values.len() + 1 {
            assert_eq!(
                rolling_extreme(&values, period, |a, b| a >= b),
                brute_force_max(&values, period),
                "period = {}",
                period
            );
        }
    }

    #[test]
    fn test_rolling_extreme_min() {
        let values = vec![4.0, 2.0, 6.0, 1.0, 3.0];
        let result = rolling_extreme(&values, 2, |a, b| a <= b);
        assert_eq!(result, vec![None, Some(2.0), Some(2.0), Some(1.0), Some(1.0)]);
    }

    #[test]
    fn test_rolling_extreme_period_far_beyond_len() {
        let values = vec![1.0, 2.0, 3.0];
        assert_eq!(rolling_extreme(&values, usize::MAX, |a, b| a >= b), vec![None; 3]);
        assert_eq!(rolling_extreme(&values, 1 << 60, |a, b| a <= b), vec![None; 3]);
    }

    #[test]
    fn test_shift_far_beyond_len() {
        let values = vec![1.0, 2.0];
        assert_eq!(shift_backward(&values, usize::MAX), vec![None; 2]);
        assert_eq!(shift_forward(&[Some(1.0), Some(2.0)], usize::MAX), vec![None; 2]);
    }

    #[test]
    fn test_rolling_extreme_zero_period() {
        let result = rolling_extreme(&[1.0, 2.0], 0, |a, b| a >= b);
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(Some(110.0), Some(90.0)), Some(100.0));
        assert_eq!(midpoint(None, Some(90.0)), None);
        assert_eq!(midpoint(Some(1.0), None), None);
        // 0은 정의된 값이며 None과 구분됨
        assert_eq!(midpoint(Some(-1.0), Some(1.0)), Some(0.0));
    }

    #[test]
    fn test_shift_forward() {
        let values = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        assert_eq!(
            shift_forward(&values, 2),
            vec![None, None, Some(1.0), None]
        );
        assert_eq!(shift_forward(&values, 0), values);
        assert_eq!(shift_forward(&values, 10), vec![None; 4]);
    }

    #[test]
    fn test_shift_backward() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            shift_backward(&values, 1),
            vec![Some(2.0), Some(3.0), Some(4.0), None]
        );
        assert_eq!(shift_backward(&values, 4), vec![None; 4]);
        assert_eq!(shift_backward(&values, 9), vec![None; 4]);
    }
}
