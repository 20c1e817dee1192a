//! Gauss-Legendre quadrature rules for numerical integration.
//!
//! Provides tabulated 1-D rules on [-1, 1] for orders 2 through 10 and
//! their tensor-product combination over the natural-coordinate square
//! of a quadrilateral element.
//!
//! The abscissae and weights are the classical Gauss-Legendre values,
//! tabulated to about 30 significant digits; an order-n rule integrates
//! polynomials up to degree 2n-1 exactly. Nothing is computed at
//! runtime: a lookup either hits the table or fails with
//! [`Error::UnsupportedQuadratureOrder`].
//!
//! # Usage
//!
//! ```
//! use claps_core::quadrature::GaussRule1d;
//!
//! let rule = GaussRule1d::new(4).unwrap();
//! let integral: f64 = rule.iter().map(|(x, w)| x * x * w).sum();
//! assert!((integral - 2.0 / 3.0).abs() < 1e-14);
//! ```

use crate::error::{Error, Result};

/// Lowest tabulated order.
pub const MIN_ORDER: usize = 2;
/// Highest tabulated order.
pub const MAX_ORDER: usize = 10;

/// Tabulated (abscissae, weights) pairs, indexed by `order - MIN_ORDER`.
///
/// Each entry holds two slices of length `order`; abscissa[i] and
/// weight[i] correspond index-for-index. Points are symmetric about 0
/// and strictly increasing, weights are positive and sum to 2.
static RULES: [(&[f64], &[f64]); 9] = [
    (
        &[
            -0.577350269189625764509148780501957455647601751270126876,
            0.577350269189625764509148780501957455647601751270126876,
        ],
        &[1.0, 1.0],
    ),
    (
        &[
            -0.774596669241483377035853079956479922166584341058318165,
            0.0,
            0.774596669241483377035853079956479922166584341058318165,
        ],
        &[
            0.555555555555555555555555555555555555555555555555555556,
            0.888888888888888888888888888888888888888888888888888889,
            0.555555555555555555555555555555555555555555555555555556,
        ],
    ),
    (
        &[
            -0.861136311594052575223946488892809505095725379629717638,
            -0.339981043584856264802665759103244687200575869770914353,
            0.339981043584856264802665759103244687200575869770914353,
            0.861136311594052575223946488892809505095725379629717638,
        ],
        &[
            0.34785484513745385737306394922199940723534869583389354,
            0.65214515486254614262693605077800059276465130416610646,
            0.65214515486254614262693605077800059276465130416610646,
            0.34785484513745385737306394922199940723534869583389354,
        ],
    ),
    (
        &[
            -0.906179845938663992797626878299392965125651910762530863,
            -0.538469310105683091036314420700208804967286606905559956,
            0.0,
            0.538469310105683091036314420700208804967286606905559956,
            0.906179845938663992797626878299392965125651910762530863,
        ],
        &[
            0.236926885056189087514264040719917362643260002212414016,
            0.47862867049936646804129151483563819291229555334314154,
            0.568888888888888888888888888888888888888888888888888889,
            0.47862867049936646804129151483563819291229555334314154,
            0.236926885056189087514264040719917362643260002212414016,
        ],
    ),
    (
        &[
            -0.932469514203152027812301554493994609134765737712289825,
            -0.661209386466264513661399595019905347006448564395170071,
            -0.23861918608319690863050172168071193541861063014002135,
            0.23861918608319690863050172168071193541861063014002135,
            0.661209386466264513661399595019905347006448564395170071,
            0.932469514203152027812301554493994609134765737712289825,
        ],
        &[
            0.171324492379170345040296142172732893526822501484043982,
            0.360761573048138607569833513837716111661521892746745482,
            0.467913934572691047389870343989550994811655605769210535,
            0.467913934572691047389870343989550994811655605769210535,
            0.360761573048138607569833513837716111661521892746745482,
            0.171324492379170345040296142172732893526822501484043982,
        ],
    ),
    (
        &[
            -0.949107912342758524526189684047851262400770937670617784,
            -0.74153118559939443986386477328078840707414764714139026,
            -0.405845151377397166906606412076961463347382014099370126,
            0.0,
            0.405845151377397166906606412076961463347382014099370126,
            0.74153118559939443986386477328078840707414764714139026,
            0.949107912342758524526189684047851262400770937670617784,
        ],
        &[
            0.129484966168869693270611432679082018328587402259946664,
            0.279705391489276667901467771423779582486925065226598765,
            0.381830050505118944950369775488975133878365083533862735,
            0.417959183673469387755102040816326530612244897959183673,
            0.381830050505118944950369775488975133878365083533862735,
            0.279705391489276667901467771423779582486925065226598765,
            0.129484966168869693270611432679082018328587402259946664,
        ],
    ),
    (
        &[
            -0.960289856497536231683560868569472990428235234301452038,
            -0.796666477413626739591553936475830436837171731615964832,
            -0.525532409916328985817739049189246349041964243120392858,
            -0.183434642495649804939476142360183980666757812912973782,
            0.183434642495649804939476142360183980666757812912973782,
            0.525532409916328985817739049189246349041964243120392858,
            0.796666477413626739591553936475830436837171731615964832,
            0.960289856497536231683560868569472990428235234301452038,
        ],
        &[
            0.1012285362903762591525313543099621901153940910516849571,
            0.222381034453374470544355994426240884430130870051249565,
            0.313706645877887287337962201986601313260328999002734938,
            0.362683783378361982965150449277195612194146039894330541,
            0.362683783378361982965150449277195612194146039894330541,
            0.313706645877887287337962201986601313260328999002734938,
            0.222381034453374470544355994426240884430130870051249565,
            0.1012285362903762591525313543099621901153940910516849571,
        ],
    ),
    (
        &[
            -0.96816023950762608983557620290367287004940480049192533,
            -0.836031107326635794299429788069734876544106718124675996,
            -0.613371432700590397308702039341474184785720604940564693,
            -0.324253423403808929038538014643336608571956260736973089,
            0.0,
            0.324253423403808929038538014643336608571956260736973089,
            0.613371432700590397308702039341474184785720604940564693,
            0.836031107326635794299429788069734876544106718124675996,
            0.96816023950762608983557620290367287004940480049192533,
        ],
        &[
            0.0812743883615744119718921581105236506756617207824107507,
            0.180648160694857404058472031242912809514337821732040484,
            0.260610696402935462318742869418632849771840204437299952,
            0.312347077040002840068630406584443665598754861261904646,
            0.330239355001259763164525069286974048878810783572688335,
            0.312347077040002840068630406584443665598754861261904646,
            0.260610696402935462318742869418632849771840204437299952,
            0.180648160694857404058472031242912809514337821732040484,
            0.0812743883615744119718921581105236506756617207824107507,
        ],
    ),
    (
        &[
            -0.973906528517171720077964012084452053428269946692382119,
            -0.865063366688984510732096688423493048527543014965330453,
            -0.679409568299024406234327365114873575769294711834809468,
            -0.433395394129247190799265943165784162200071837656246497,
            -0.148874338981631210884826001129719984617564859420691696,
            0.148874338981631210884826001129719984617564859420691696,
            0.433395394129247190799265943165784162200071837656246497,
            0.679409568299024406234327365114873575769294711834809468,
            0.865063366688984510732096688423493048527543014965330453,
            0.973906528517171720077964012084452053428269946692382119,
        ],
        &[
            0.0666713443086881375935688098933317928578648343201581451,
            0.149451349150580593145776339657697332402556639669427368,
            0.21908636251598204399553493422816319245877187052267709,
            0.269266719309996355091226921569469352859759938460883796,
            0.295524224714752870173892994651338329421046717026853601,
            0.295524224714752870173892994651338329421046717026853601,
            0.269266719309996355091226921569469352859759938460883796,
            0.21908636251598204399553493422816319245877187052267709,
            0.149451349150580593145776339657697332402556639669427368,
            0.0666713443086881375935688098933317928578648343201581451,
        ],
    ),
];

/// Tabulated 1-D Gauss-Legendre rule on [-1, 1].
///
/// Constructed by [`GaussRule1d::new`] for orders 2 through 10. The
/// rule borrows `'static` table data, so it is `Copy` and safe to share
/// across threads without synchronization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussRule1d {
    points: &'static [f64],
    weights: &'static [f64],
}

impl GaussRule1d {
    /// Look up the rule for the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedQuadratureOrder`] for orders outside
    /// 2..=10. There is no extrapolation between tabulated rules.
    pub fn new(order: usize) -> Result<Self> {
        order
            .checked_sub(MIN_ORDER)
            .and_then(|i| RULES.get(i))
            .map(|&(points, weights)| Self { points, weights })
            .ok_or(Error::UnsupportedQuadratureOrder(order))
    }

    /// Number of integration points.
    pub fn order(&self) -> usize {
        self.points.len()
    }

    /// Abscissae in [-1, 1], strictly increasing.
    pub fn points(&self) -> &'static [f64] {
        self.points
    }

    /// Weights, index-matched with [`Self::points`].
    pub fn weights(&self) -> &'static [f64] {
        self.weights
    }

    /// Iterate over (point, weight) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + 'static {
        self.points
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
    }
}

/// Raw table access: abscissae and weights for the given order.
///
/// Same contract as [`GaussRule1d::new`], for callers that want the
/// bare slices.
pub fn get_points_weights(order: usize) -> Result<(&'static [f64], &'static [f64])> {
    let rule = GaussRule1d::new(order)?;
    Ok((rule.points, rule.weights))
}

/// Tensor-product rule over the natural-coordinate square [-1, 1]².
///
/// Combines two 1-D rules, one per natural axis. Iteration order is
/// row-major with ξ as the outer axis, which fixes the floating-point
/// summation order and keeps element integration bit-reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussRule2d {
    /// Rule along the ξ axis.
    pub xi: GaussRule1d,
    /// Rule along the η axis.
    pub eta: GaussRule1d,
}

impl GaussRule2d {
    /// Tensor product of the same 1-D rule on both axes.
    pub fn tensor(order: usize) -> Result<Self> {
        let rule = GaussRule1d::new(order)?;
        Ok(Self {
            xi: rule,
            eta: rule,
        })
    }

    /// Tensor product with a distinct order per axis.
    pub fn with_orders(order_xi: usize, order_eta: usize) -> Result<Self> {
        Ok(Self {
            xi: GaussRule1d::new(order_xi)?,
            eta: GaussRule1d::new(order_eta)?,
        })
    }

    /// Total number of 2-D integration points.
    pub fn len(&self) -> usize {
        self.xi.order() * self.eta.order()
    }

    /// True if either axis has no points (never for tabulated rules).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over (ξ, η, combined weight) triples.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + 'static {
        let eta = self.eta;
        self.xi
            .iter()
            .flat_map(move |(x, wx)| eta.iter().map(move |(e, we)| (x, e, wx * we)))
    }
}
