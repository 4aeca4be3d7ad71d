#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageMeta {
	pub total_results: u64,
	pub total_pages: u64,
	pub current_page: u32,
	pub per_page: u32,
}

/// `total_pages` is the ceiling of `total_found / per_page`, so it is zero
/// exactly when `total_found` is zero.
pub fn page_meta(total_found: u64, page: u32, per_page: u32) -> PageMeta {
	PageMeta {
		total_results: total_found,
		total_pages: total_found.div_ceil(u64::from(per_page)),
		current_page: page,
		per_page,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pages_are_the_ceiling_of_the_quotient() {
		assert_eq!(page_meta(21, 1, 10).total_pages, 3);
		assert_eq!(page_meta(20, 1, 10).total_pages, 2);
		assert_eq!(page_meta(1, 1, 10).total_pages, 1);
	}

	#[test]
	fn zero_hits_means_zero_pages() {
		let meta = page_meta(0, 3, 25);

		assert_eq!(meta.total_pages, 0);
		assert_eq!(meta.total_results, 0);
		assert_eq!(meta.current_page, 3);
		assert_eq!(meta.per_page, 25);
	}

	#[test]
	fn ceiling_invariant_holds_over_a_sweep() {
		for total in 0..200u64 {
			for per_page in 1..25u32 {
				let meta = page_meta(total, 1, per_page);

				assert_eq!(meta.total_pages, total.div_ceil(u64::from(per_page)));
				assert_eq!(meta.total_pages == 0, total == 0);
			}
		}
	}
}
