//! Powell's conjugate-direction method.
//!
//! Each iteration line-minimizes along every direction in the set, then
//! tries the net displacement of the iteration as a new direction:
//!
//! ```text
//!   x₀ ──d₁──→ x₁ ──d₂──→ … ──dₙ──→ xₙ        d_new = xₙ − x₀
//! ```
//!
//! Line minimization brackets the minimum by golden-section expansion and
//! refines it with Brent's parabolic interpolation. No derivatives, no
//! bounds.

use tracing::debug;

use super::{Counted, OptimizationResult, Optimizer};

const GOLDEN: f64 = 1.618_034;
const CGOLD: f64 = 0.381_966_0;
const GROW_LIMIT: f64 = 110.0;
const TINY: f64 = 1e-21;
const BRACKET_MAXITER: usize = 1000;
const BRENT_MAXITER: usize = 500;
const BRENT_MINTOL: f64 = 1.0e-11;

/// Powell optimizer configuration.
#[derive(Debug, Clone)]
pub struct Powell {
    /// Line-search tolerance is `100 * xtol`.
    pub xtol: f64,
    /// Relative decrease below which an iteration counts as converged.
    pub ftol: f64,
    /// Defaults to `1000 * n` when unset.
    pub maxiter: Option<usize>,
    /// Defaults to `1000 * n` when unset.
    pub maxfev: Option<usize>,
}

impl Default for Powell {
    fn default() -> Self {
        Self {
            xtol: 1e-4,
            ftol: 1e-4,
            maxiter: None,
            maxfev: None,
        }
    }
}

impl Powell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both `xtol` and `ftol`.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.xtol = tol;
        self.ftol = tol;
        self
    }

    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = Some(maxiter);
        self
    }

    #[must_use]
    pub fn with_maxfev(mut self, maxfev: usize) -> Self {
        self.maxfev = Some(maxfev);
        self
    }
}

impl Optimizer for Powell {
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial_params.len();
        let maxiter = self.maxiter.unwrap_or(n * 1000);
        let maxfev = self.maxfev.unwrap_or(n * 1000);
        let line_tol = self.xtol * 100.0;

        let mut f = Counted::new(objective);
        let mut x = initial_params;
        let mut fval = f.call(&x);
        let mut history = vec![fval];
        let mut directions: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        let mut iterations = 0;
        let mut converged = false;

        while n > 0 && fval.is_finite() {
            let start = x.clone();
            let f_start = fval;
            let mut biggest = 0;
            let mut delta = 0.0;

            for (i, direction) in directions.iter().enumerate() {
                let f_before = fval;
                let (f_new, x_new, _) = line_search(&mut f, &x, direction, line_tol);
                if f_new <= fval {
                    fval = f_new;
                    x = x_new;
                }
                if f_before - fval > delta {
                    delta = f_before - fval;
                    biggest = i;
                }
            }

            iterations += 1;
            history.push(fval);

            if 2.0 * (f_start - fval) <= self.ftol * (f_start.abs() + fval.abs()) + 1e-20 {
                converged = true;
                break;
            }
            if f.calls() >= maxfev || iterations >= maxiter {
                break;
            }

            // Extrapolate along the net displacement.
            let displacement: Vec<f64> = x.iter().zip(&start).map(|(a, b)| a - b).collect();
            let extrapolated: Vec<f64> = x.iter().zip(&start).map(|(a, b)| 2.0 * a - b).collect();
            let f_extra = f.call(&extrapolated);

            if f_start > f_extra {
                let mut t = 2.0 * (f_start + f_extra - 2.0 * fval);
                let tmp = f_start - fval - delta;
                t *= tmp * tmp;
                let tmp = f_start - f_extra;
                t -= delta * tmp * tmp;

                if t < 0.0 {
                    let (f_new, x_new, step) = line_search(&mut f, &x, &displacement, line_tol);
                    if f_new <= fval {
                        fval = f_new;
                        x = x_new;
                    }
                    if step.iter().any(|s| *s != 0.0) {
                        let last = n - 1;
                        directions.swap(biggest, last);
                        directions[last] = step;
                    }
                }
            }
        }

        debug!(
            iterations,
            evaluations = f.calls(),
            value = fval,
            converged,
            "powell finished"
        );

        OptimizationResult {
            optimal_params: x,
            optimal_value: fval,
            num_evaluations: f.calls(),
            num_iterations: iterations,
            history,
            converged,
        }
    }
}

/// Minimize along `direction` from `origin`.
///
/// Returns `(f(x_min), x_min, x_min - origin)`.
fn line_search<F>(
    f: &mut Counted<F>,
    origin: &[f64],
    direction: &[f64],
    tol: f64,
) -> (f64, Vec<f64>, Vec<f64>)
where
    F: FnMut(&[f64]) -> f64,
{
    let point = |alpha: f64| -> Vec<f64> {
        origin
            .iter()
            .zip(direction)
            .map(|(o, d)| o + alpha * d)
            .collect()
    };

    if direction.iter().all(|d| *d == 0.0) {
        let value = f.call(origin);
        return (value, origin.to_vec(), direction.to_vec());
    }

    let mut phi = |alpha: f64| f.call(&point(alpha));
    let (alpha, value) = brent(&mut phi, tol);
    let step: Vec<f64> = direction.iter().map(|d| alpha * d).collect();
    (value, point(alpha), step)
}

/// Bracketing triple `(a, b, c)` with `f(b) < f(a)` and `f(b) < f(c)`,
/// plus the three values.
fn bracket(phi: &mut impl FnMut(f64) -> f64) -> ([f64; 3], [f64; 3]) {
    let (mut xa, mut xb) = (0.0, 1.0);
    let mut fa = phi(xa);
    let mut fb = phi(xb);
    if fa < fb {
        std::mem::swap(&mut xa, &mut xb);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut xc = xb + GOLDEN * (xb - xa);
    let mut fc = phi(xc);

    let mut iter = 0;
    while fc < fb {
        let tmp1 = (xb - xa) * (fb - fc);
        let tmp2 = (xb - xc) * (fb - fa);
        let val = tmp2 - tmp1;
        let denom = if val.abs() < TINY { 2.0 * TINY } else { 2.0 * val };
        let mut w = xb - ((xb - xc) * tmp2 - (xb - xa) * tmp1) / denom;
        let wlim = xb + GROW_LIMIT * (xc - xb);
        if iter > BRACKET_MAXITER {
            break;
        }
        iter += 1;

        let mut fw;
        if (w - xc) * (xb - w) > 0.0 {
            fw = phi(w);
            if fw < fc {
                xa = xb;
                xb = w;
                fa = fb;
                fb = fw;
                break;
            } else if fw > fb {
                xc = w;
                fc = fw;
                break;
            }
            w = xc + GOLDEN * (xc - xb);
            fw = phi(w);
        } else if (w - wlim) * (wlim - xc) >= 0.0 {
            w = wlim;
            fw = phi(w);
        } else if (w - wlim) * (xc - w) > 0.0 {
            fw = phi(w);
            if fw < fc {
                xb = xc;
                xc = w;
                w = xc + GOLDEN * (xc - xb);
                fb = fc;
                fc = fw;
                fw = phi(w);
            }
        } else {
            w = xc + GOLDEN * (xc - xb);
            fw = phi(w);
        }

        xa = xb;
        xb = xc;
        xc = w;
        fa = fb;
        fb = fc;
        fc = fw;
    }

    ([xa, xb, xc], [fa, fb, fc])
}

/// Brent's method on a bracketed 1-D function. Returns `(x_min, f(x_min))`.
fn brent(phi: &mut impl FnMut(f64) -> f64, tol: f64) -> (f64, f64) {
    let ([xa, xb, xc], [_, fb, _]) = bracket(&mut *phi);

    let (mut a, mut b) = if xa < xc { (xa, xc) } else { (xc, xa) };
    let (mut x, mut w, mut v) = (xb, xb, xb);
    let (mut fx, mut fw, mut fv) = (fb, fb, fb);
    let mut deltax: f64 = 0.0;
    let mut rat: f64 = 0.0;

    for _ in 0..BRENT_MAXITER {
        let tol1 = tol * x.abs() + BRENT_MINTOL;
        let tol2 = 2.0 * tol1;
        let xmid = 0.5 * (a + b);
        if (x - xmid).abs() < tol2 - 0.5 * (b - a) {
            break;
        }

        if deltax.abs() <= tol1 {
            deltax = if x >= xmid { a - x } else { b - x };
            rat = CGOLD * deltax;
        } else {
            // Parabolic step through x, w, v.
            let tmp1 = (x - w) * (fx - fv);
            let mut tmp2 = (x - v) * (fx - fw);
            let mut p = (x - v) * tmp2 - (x - w) * tmp1;
            tmp2 = 2.0 * (tmp2 - tmp1);
            if tmp2 > 0.0 {
                p = -p;
            }
            tmp2 = tmp2.abs();
            let dx_prev = deltax;
            deltax = rat;

            if p > tmp2 * (a - x) && p < tmp2 * (b - x) && p.abs() < (0.5 * tmp2 * dx_prev).abs() {
                rat = p / tmp2;
                let u = x + rat;
                if (u - a) < tol2 || (b - u) < tol2 {
                    rat = if xmid - x >= 0.0 { tol1 } else { -tol1 };
                }
            } else {
                deltax = if x >= xmid { a - x } else { b - x };
                rat = CGOLD * deltax;
            }
        }

        let u = if rat.abs() < tol1 {
            if rat >= 0.0 { x + tol1 } else { x - tol1 }
        } else {
            x + rat
        };
        let fu = phi(u);

        if fu > fx {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        } else {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        }
    }

    (x, fx)
}
