use std::io::{self, BufRead, Write};

use crate::record::SalesRecord;

/// Asks the user for the sales figures of the last market
///
/// Keeps asking until a line of six comma separated, whole numbers was entered.
/// Invalid lines are explained to the user and never fail the collection; only
/// I/O errors do, including the input ending before a valid line was read.
pub fn collect_sales<R, W>(mut input: R, mut output: W) -> io::Result<SalesRecord>
    where R: BufRead,
          W: Write,
{
    let mut line = String::new();

    loop {
        writeln!(output, "Please enter sales data from the last market.")?;
        writeln!(output, "Data should be six numbers, separated by commas.")?;
        writeln!(output, "Example: 10,20,30,40,50,60\n")?;
        write!(output, "Enter your data here: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "the input ended before valid sales data was entered",
            ));
        }

        match line.parse::<SalesRecord>() {
            Ok(sales) => {
                writeln!(output, "Data is valid!\n")?;
                log::debug!("collected sales {:?}", sales.values());
                return Ok(sales);
            }
            Err(error) => {
                log::debug!("rejected sales input {:?}: {}", line.trim_end(), error);
                writeln!(output, "Invalid data: {}, please try again.\n", error)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> (io::Result<SalesRecord>, String) {
        let mut output = Vec::new();
        let sales = collect_sales(input.as_bytes(), &mut output);
        (sales, String::from_utf8(output).unwrap())
    }

    #[test]
    fn first_line_valid() {
        let (sales, output) = collect("10,20,30,40,50,60\n");
        assert_eq!(sales.unwrap(), SalesRecord::new([10, 20, 30, 40, 50, 60]));
        assert_eq!(output.matches("Enter your data here: ").count(), 1);
        assert!(output.ends_with("Data is valid!\n\n"));
    }

    #[test]
    fn last_line_without_newline() {
        let (sales, _) = collect("1, 2, 3, 4, 5, 6");
        assert_eq!(sales.unwrap(), SalesRecord::new([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn asks_until_valid() {
        let (sales, output) = collect(concat!(
            "10,20,30\n",
            "10,twenty,30,forty,50,60\n",
            "\n",
            "7,6,5,4,3,2\n",
        ));
        assert_eq!(sales.unwrap(), SalesRecord::new([7, 6, 5, 4, 3, 2]));
        assert_eq!(output.matches("Enter your data here: ").count(), 4);
        assert!(output.contains("Invalid data: expected 6 values but received 3, please try again."));
        assert!(output.contains(r#"Invalid data: expected only numbers but received ["twenty", "forty"], please try again."#));
        assert!(output.contains(r#"Invalid data: expected only numbers but received [""], please try again."#));
    }

    #[test]
    fn input_ends_early() {
        let (sales, output) = collect("1,2,3\n");
        assert_eq!(sales.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(output.matches("Invalid data").count(), 1);
    }

    #[test]
    fn no_input() {
        let (sales, _) = collect("");
        assert_eq!(sales.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
