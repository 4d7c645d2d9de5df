//! Print the unitary 2-dilation of the contraction
//! T = | 0.5 0.5 |
//!     | 0   0.5 |

use nalgebra::dmatrix;
use unitary_dilation::unitary_n_dilation;

fn main() {
    let t = dmatrix![0.5, 0.5; 0.0, 0.5];

    match unitary_n_dilation(&t, 2) {
        Ok(dilation) => println!("{dilation:.4}"),
        Err(err) => eprintln!("{err}"),
    }
}
