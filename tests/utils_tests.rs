//! Code generator tests

use std::collections::HashSet;

use linkbox::utils::generate_random_code;

#[test]
fn generated_code_has_requested_length() {
    for length in [1, 5, 8] {
        assert_eq!(generate_random_code(length).len(), length);
    }
}

#[test]
fn generated_code_is_alphanumeric() {
    let code = generate_random_code(64);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn generated_codes_rarely_collide() {
    // 62^5 的码空间里一千次生成不应出现重复
    let codes: HashSet<String> = (0..1000).map(|_| generate_random_code(5)).collect();
    assert_eq!(codes.len(), 1000);
}
