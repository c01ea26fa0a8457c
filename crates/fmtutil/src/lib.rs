use std::fmt;

/// Display a slice of displayable items, e.g. `[1, 2, 3]`.
#[derive(Debug, Clone, Copy)]
pub struct DisplayableSlice<'a, T> {
    open: &'static str,
    close: &'static str,
    sep: &'static str,
    slice: &'a [T],
}

impl<'a, T: fmt::Display> fmt::Display for DisplayableSlice<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.open)?;
        for (idx, item) in self.slice.iter().enumerate() {
            if idx > 0 {
                write!(f, "{}", self.sep)?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "{}", self.close)
    }
}

pub trait IntoDisplayableSlice<T> {
    /// Display with surrounding brackets.
    fn display_with_brackets(&self) -> DisplayableSlice<'_, T>;

    /// Display items separated by commas, without any delimiters.
    fn display_as_list(&self) -> DisplayableSlice<'_, T>;
}

impl<T: fmt::Display> IntoDisplayableSlice<T> for [T] {
    fn display_with_brackets(&self) -> DisplayableSlice<'_, T> {
        DisplayableSlice {
            open: "[",
            close: "]",
            sep: ", ",
            slice: self,
        }
    }

    fn display_as_list(&self) -> DisplayableSlice<'_, T> {
        DisplayableSlice {
            open: "",
            close: "",
            sep: ", ",
            slice: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets() {
        let s = [2, 0].display_with_brackets().to_string();
        assert_eq!("[2, 0]", s);
    }

    #[test]
    fn empty_brackets() {
        let v: Vec<usize> = Vec::new();
        assert_eq!("[]", v.display_with_brackets().to_string());
    }

    #[test]
    fn list() {
        let s = ["a", "b"].display_as_list().to_string();
        assert_eq!("a, b", s);
    }
}
