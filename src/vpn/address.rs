use rand::Rng;

/// Picks `<prefix>.X.Y` with X and Y uniform in 0..=254.
/// No leasing and no collision check.
pub fn synthetic_address(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    format!("{}.{}.{}", prefix, rng.gen_range(0..255u8), rng.gen_range(0..255u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_inside_prefix_and_range() {
        for _ in 0..500 {
            let ip = synthetic_address("10.8");
            let octets: Vec<u16> = ip.split('.').map(|o| o.parse().unwrap()).collect();
            assert_eq!(octets.len(), 4);
            assert_eq!(&octets[..2], &[10, 8]);
            assert!(octets[2] <= 254 && octets[3] <= 254, "out of range: {ip}");
        }
    }
}
