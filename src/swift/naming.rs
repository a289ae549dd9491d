//! Identifier derivation and ordering for generated Swift accessors.

use std::cmp::Ordering;

/// Derive the Swift property name for an image set within its group.
///
/// When the enclosing group's property name is a case-insensitive prefix of
/// the catalog name the shared prefix is stripped, so `ToolbarBack` inside
/// the `toolbar` group becomes `back`. The remainder is camel-cased and
/// prefixed with `i` when it would otherwise start with a digit.
pub fn property_name(catalog_name: &str, group_property: Option<&str>) -> String {
    let mut name = catalog_name;

    if let Some(group) = group_property
        && let Some(prefix) = name.get(..group.len())
        && prefix.eq_ignore_ascii_case(group)
    {
        name = &name[group.len()..];
    }

    let mut property = camel_case(name);

    if property.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        property.insert(0, 'i');
    }

    property
}

/// Camel-case a name: words are split on non-alphanumeric boundaries, the
/// first word's leading letter is lower-cased and subsequent words' leading
/// letters are upper-cased. The rest of each word keeps its original case.
pub fn camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut first_word = true;

    for word in name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if first_word {
                result.extend(first.to_lowercase());
            } else {
                result.extend(first.to_uppercase());
            }
            result.push_str(chars.as_str());
        }
        first_word = false;
    }

    result
}

/// Numeric-aware, case-insensitive ordering for sibling accessors, so that
/// `image2` precedes `image10`. Ties fall back to a case-sensitive
/// comparison to keep the ordering total.
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let left_chars: Vec<char> = left.chars().collect();
    let right_chars: Vec<char> = right.chars().collect();
    let mut i = 0;
    let mut j = 0;

    while i < left_chars.len() && j < right_chars.len() {
        let a = left_chars[i];
        let b = right_chars[j];

        if a.is_ascii_digit() && b.is_ascii_digit() {
            let left_end = digit_run_end(&left_chars, i);
            let right_end = digit_run_end(&right_chars, j);

            let ordering = compare_digit_runs(&left_chars[i..left_end], &right_chars[j..right_end]);
            if ordering != Ordering::Equal {
                return ordering;
            }

            i = left_end;
            j = right_end;
            continue;
        }

        let ordering = a.to_lowercase().cmp(b.to_lowercase());
        if ordering != Ordering::Equal {
            return ordering;
        }

        i += 1;
        j += 1;
    }

    if i < left_chars.len() {
        return Ordering::Greater;
    }
    if j < right_chars.len() {
        return Ordering::Less;
    }

    left.cmp(right)
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn compare_digit_runs(left: &[char], right: &[char]) -> Ordering {
    let left = strip_leading_zeros(left);
    let right = strip_leading_zeros(right);

    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn strip_leading_zeros(digits: &[char]) -> &[char] {
    match digits.iter().position(|&digit| digit != '0') {
        Some(first) => &digits[first..],
        None => &digits[digits.len().saturating_sub(1)..],
    }
}
