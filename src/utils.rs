/// inclusive (min, max) argument counts, `None` meaning unbounded
pub type Dual = (Option<usize>, Option<usize>);

fn plural(n: usize) -> &'static str {
	if n == 1 {""} else {"s"}
}

pub fn format_arg_range(range: Dual) -> String {
	match range {
		(Some(start), Some(end)) => if start == end {
			format!("{} argument{}", start, plural(start))
		} else {
			format!("{} to {} arguments", start, end)
		},
		(Some(start), None) => format!("at least {} argument{}", start, plural(start)),
		(None, Some(0)) => "0 arguments".to_string(),
		(None, Some(end)) => format!("at most {} argument{}", end, plural(end)),
		(None, None) => "any number of arguments".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arg_range_wording() {
		assert_eq!(format_arg_range((Some(1), Some(1))), "1 argument");
		assert_eq!(format_arg_range((Some(2), Some(2))), "2 arguments");
		assert_eq!(format_arg_range((Some(1), None)), "at least 1 argument");
		assert_eq!(format_arg_range((Some(0), Some(3))), "0 to 3 arguments");
		assert_eq!(format_arg_range((None, Some(2))), "at most 2 arguments");
		assert_eq!(format_arg_range((None, None)), "any number of arguments");
	}
}
